//! Tiered context assembly — renders the Focus Document into one of three
//! fixed-shape, fixed-token-budget reports, plus the shorter summary
//! emitted before a memory compaction.
//!
//! Tiers:
//!   - minimal (~250 tokens): focus summary, top key decisions, next task, hint
//!   - standard (~500 tokens): + focus block, task criteria, last session work
//!   - full (~2000 tokens): + all decisions, all criteria, progress excerpt
//!
//! # Determinism
//!
//! Identical inputs always produce identical output. Decision maps keep
//! insertion order, and no clock or randomness participates in a render.

use crate::criteria::extract_acceptance_criteria;
use focuskeeper_core::{ContextLevel, FocusConfig, FocusDocument, ProjectDocuments};
use indexmap::IndexMap;

/// Decisions shown by the limited tiers.
const DECISION_LIMIT: usize = 3;
/// Decisions shown in the compaction summary.
const COMPACTION_DECISION_LIMIT: usize = 2;
/// Criteria lines shown by the standard tier (full shows all).
const CRITERIA_LIMIT: usize = 5;
/// Last-session work items shown by the standard tier.
const WORK_ITEM_LIMIT: usize = 3;
/// Next tasks shown by the standard tier.
const NEXT_TASK_LIMIT: usize = 3;
/// Progress-log lines included by the full tier.
const PROGRESS_LINE_LIMIT: usize = 30;
/// Display cap for decision values in the minimal session render.
const VALUE_CAP_SESSION: usize = 60;
/// Display cap for decision values in the compaction summary.
const VALUE_CAP_COMPACTION: usize = 50;

/// Select up to `count` decisions, epic-related ones first.
///
/// A decision is epic-related when its label or value contains the epic
/// name as a case-insensitive substring. Order within each partition is
/// the stored insertion order — relatedness is the only reordering.
pub fn select_key_decisions<'a>(
    decisions: &'a IndexMap<String, String>,
    epic: Option<&str>,
    count: usize,
) -> Vec<(&'a str, &'a str)> {
    let epic_lower = epic
        .map(str::to_lowercase)
        .filter(|e| !e.is_empty());

    let mut epic_related = Vec::new();
    let mut others = Vec::new();

    for (label, value) in decisions {
        let related = epic_lower.as_deref().is_some_and(|epic| {
            label.to_lowercase().contains(epic) || value.to_lowercase().contains(epic)
        });
        if related {
            epic_related.push((label.as_str(), value.as_str()));
        } else {
            others.push((label.as_str(), value.as_str()));
        }
    }

    epic_related.extend(others);
    epic_related.truncate(count);
    epic_related
}

/// Display-only truncation: values longer than `cap` characters are cut to
/// `cap − 3` characters with an ellipsis suffix. The stored value is never
/// mutated.
fn truncate_value(value: &str, cap: usize) -> String {
    if value.chars().count() > cap {
        let mut out: String = value.chars().take(cap.saturating_sub(3)).collect();
        out.push_str("...");
        out
    } else {
        value.to_string()
    }
}

/// Configured integration display strings joined for the minimal header,
/// or `None` when nothing is configured.
fn format_integrations(config: &FocusConfig) -> Option<String> {
    let parts: Vec<&str> = [
        config.integrations.workflow.as_deref(),
        config.integrations.tdd.as_deref(),
        config.integrations.code_analysis.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" + "))
    }
}

/// The `**Epic:** … | **Task:** … | **Phase:** …` line, or `None` when no
/// part is set.
fn focus_detail_line(doc: &FocusDocument) -> Option<String> {
    let cf = &doc.current_focus;
    let parts: Vec<String> = [
        cf.epic.as_deref().map(|e| format!("**Epic:** {e}")),
        cf.task.as_deref().map(|t| format!("**Task:** {t}")),
        cf.phase.as_deref().map(|p| format!("**Phase:** {p}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

/// The `## Current Focus` block shared by the standard and full tiers.
/// `with_status` is a full-tier addition.
fn push_focus_block(lines: &mut Vec<String>, doc: &FocusDocument, with_status: bool) {
    let cf = &doc.current_focus;
    lines.push("## Current Focus".into());
    lines.push(format!("- **Type:** {}", cf.kind.as_deref().unwrap_or("none")));
    lines.push(format!(
        "- **Name:** {}",
        cf.name.as_deref().unwrap_or("No active focus")
    ));
    if let Some(epic) = &cf.epic {
        lines.push(format!("- **Epic:** {epic}"));
    }
    if let Some(task) = &cf.task {
        lines.push(format!("- **Task:** {task}"));
    }
    if let Some(phase) = &cf.phase {
        lines.push(format!("- **Phase:** {phase}"));
    }
    if with_status {
        if let Some(status) = &cf.status {
            lines.push(format!("- **Status:** {status}"));
        }
    }
    lines.push(String::new());
}

/// Minimal tier: a one-screen summary for routine session starts.
pub fn render_minimal(doc: &FocusDocument) -> String {
    let cf = &doc.current_focus;
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Focuskeeper Session".into());
    lines.push(String::new());

    if let Some(integrations) = format_integrations(&doc.config) {
        lines.push(format!("**Integrations:** {integrations}"));
    }

    lines.push(format!(
        "**Focus:** {} - {}",
        cf.kind.as_deref().unwrap_or("none"),
        cf.name.as_deref().unwrap_or("No active focus")
    ));
    if let Some(detail) = focus_detail_line(doc) {
        lines.push(detail);
    }
    lines.push(String::new());

    let selected = select_key_decisions(&doc.key_decisions, cf.epic.as_deref(), DECISION_LIMIT);
    if !selected.is_empty() {
        lines.push("**Key Decisions:**".into());
        for (label, value) in selected {
            lines.push(format!("- {label}: {}", truncate_value(value, VALUE_CAP_SESSION)));
        }
        lines.push(String::new());
    }

    if let Some(next) = doc.next_session_tasks.first() {
        lines.push(format!("**Next:** {next}"));
        lines.push(String::new());
    }

    lines.push(r#"> Say "load context" for full project details"#.into());

    lines.join("\n")
}

/// Standard tier: minimal plus the active task's acceptance criteria and
/// the last session's work.
pub fn render_standard(doc: &FocusDocument, task: Option<&str>) -> String {
    let cf = &doc.current_focus;
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Focuskeeper Session".into());
    lines.push(String::new());
    push_focus_block(&mut lines, doc, false);

    let selected = select_key_decisions(&doc.key_decisions, cf.epic.as_deref(), DECISION_LIMIT);
    if !selected.is_empty() {
        lines.push("## Key Decisions".into());
        for (label, value) in selected {
            lines.push(format!("- **{label}:** {value}"));
        }
        lines.push(String::new());
    }

    if let Some(task) = task {
        let criteria = extract_acceptance_criteria(task);
        if !criteria.is_empty() {
            lines.push("## Active Task Criteria".into());
            for item in criteria.iter().take(CRITERIA_LIMIT) {
                lines.push(item.clone());
            }
            lines.push(String::new());
        }
    }

    if !doc.session_summary.work_done.is_empty() {
        lines.push("## Last Session".into());
        if let Some(date) = &doc.session_summary.date {
            lines.push(format!("**Date:** {date}"));
        }
        for item in doc.session_summary.work_done.iter().take(WORK_ITEM_LIMIT) {
            lines.push(format!("- {item}"));
        }
        lines.push(String::new());
    }

    if !doc.next_session_tasks.is_empty() {
        lines.push("## Next Tasks".into());
        for task in doc.next_session_tasks.iter().take(NEXT_TASK_LIMIT) {
            lines.push(format!("- {task}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Full tier: everything, plus a verbatim excerpt of the progress log.
pub fn render_full(doc: &FocusDocument, task: Option<&str>, progress: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Focuskeeper: Full Project Context".into());
    lines.push(String::new());
    push_focus_block(&mut lines, doc, true);

    if !doc.key_decisions.is_empty() {
        lines.push("## Key Decisions".into());
        for (label, value) in &doc.key_decisions {
            lines.push(format!("- **{label}:** {value}"));
        }
        lines.push(String::new());
    }

    if let Some(task) = task {
        let criteria = extract_acceptance_criteria(task);
        if !criteria.is_empty() {
            lines.push("## Active Task Criteria".into());
            lines.extend(criteria);
            lines.push(String::new());
        }
    }

    if !doc.session_summary.work_done.is_empty() {
        lines.push("## Last Session".into());
        if let Some(date) = &doc.session_summary.date {
            lines.push(format!("**Date:** {date}"));
        }
        lines.push("**Work Done:**".into());
        for item in &doc.session_summary.work_done {
            lines.push(format!("- {item}"));
        }
        lines.push(String::new());
    }

    if !doc.next_session_tasks.is_empty() {
        lines.push("## Next Tasks".into());
        for task in &doc.next_session_tasks {
            lines.push(format!("- {task}"));
        }
        lines.push(String::new());
    }

    if let Some(progress) = progress.filter(|p| !p.trim().is_empty()) {
        lines.push("## Recent Progress".into());
        let excerpt: Vec<&str> = progress.lines().take(PROGRESS_LINE_LIMIT).collect();
        lines.push(excerpt.join("\n"));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// The summary emitted before a memory compaction (<500 tokens): just the
/// essentials needed to continue work, with tighter value truncation than
/// the session renders.
pub fn render_compaction_summary(doc: &FocusDocument) -> String {
    let cf = &doc.current_focus;
    let mut lines: Vec<String> = Vec::new();

    lines.push("## Focuskeeper Preserved".into());
    lines.push(String::new());

    if cf.kind.as_deref().is_some_and(|k| k != "none") {
        lines.push(format!(
            "**Focus:** {} - {}",
            cf.kind.as_deref().unwrap_or("none"),
            cf.name.as_deref().unwrap_or("unnamed")
        ));
        let parts: Vec<String> = [
            cf.epic.as_deref().map(|e| format!("Epic: {e}")),
            cf.task.as_deref().map(|t| format!("Task: {t}")),
            cf.phase.as_deref().map(|p| format!("Phase: {p}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !parts.is_empty() {
            lines.push(parts.join(" | "));
        }
        lines.push(String::new());
    }

    if !doc.key_decisions.is_empty() {
        lines.push("**Key Decisions:**".into());
        for (label, value) in doc.key_decisions.iter().take(COMPACTION_DECISION_LIMIT) {
            lines.push(format!(
                "- {label}: {}",
                truncate_value(value, VALUE_CAP_COMPACTION)
            ));
        }
        lines.push(String::new());
    }

    if let Some(next) = doc.next_session_tasks.first() {
        lines.push(format!("**Next:** {next}"));
        lines.push(String::new());
    }

    if doc.config.tdd_enforcement.as_deref() == Some("strict") {
        lines.push("**TDD:** Write tests before code".into());
    }
    if doc.config.feature_dev_required {
        lines.push("**Workflow:** Use /feature-dev for tasks".into());
    }

    lines.push(String::new());
    lines.push("> Full context: `.project/context/focus.json`".into());

    lines.join("\n")
}

/// Tier dispatch: resolve which collaborator documents the tier needs,
/// request them, and delegate to the matching render.
pub fn build_context(
    doc: &FocusDocument,
    documents: &impl ProjectDocuments,
    level: ContextLevel,
) -> String {
    match level {
        ContextLevel::Full => {
            let task = documents.active_task(&doc.current_focus);
            let progress = documents.progress_log();
            render_full(doc, task.as_deref(), progress.as_deref())
        }
        ContextLevel::Standard => {
            let task = documents.active_task(&doc.current_focus);
            render_standard(doc, task.as_deref())
        }
        ContextLevel::Minimal => render_minimal(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focuskeeper_core::CurrentFocus;

    fn decisions(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_doc() -> FocusDocument {
        FocusDocument {
            current_focus: CurrentFocus {
                kind: Some("task".into()),
                name: Some("Add login".into()),
                epic: Some("auth".into()),
                task: Some("3".into()),
                ..Default::default()
            },
            key_decisions: decisions(&[
                ("use-jwt", "Use JWT for sessions"),
                ("db", "Postgres chosen"),
            ]),
            next_session_tasks: vec!["Write tests".into(), "Update docs".into()],
            ..Default::default()
        }
    }

    struct StubDocs {
        task: Option<String>,
        progress: Option<String>,
    }

    impl ProjectDocuments for StubDocs {
        fn active_task(&self, _focus: &CurrentFocus) -> Option<String> {
            self.task.clone()
        }
        fn progress_log(&self) -> Option<String> {
            self.progress.clone()
        }
    }

    // ── Selection ──────────────────────────────────────────────────────

    #[test]
    fn selection_returns_at_most_count() {
        let d = decisions(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
        assert_eq!(select_key_decisions(&d, None, 3).len(), 3);
        assert_eq!(select_key_decisions(&d, None, 10).len(), 4);
    }

    #[test]
    fn epic_related_decisions_come_first_regardless_of_insertion_order() {
        let d = decisions(&[
            ("db", "Postgres chosen"),
            ("auth-strategy", "JWT with refresh tokens"),
            ("ui", "Mentions AUTH flows in the value"),
        ]);
        let selected = select_key_decisions(&d, Some("auth"), 3);
        let labels: Vec<&str> = selected.iter().map(|(l, _)| *l).collect();
        // Both related entries (label match, case-insensitive value match)
        // precede the unrelated one, keeping their own stored order.
        assert_eq!(labels, vec!["auth-strategy", "ui", "db"]);
    }

    #[test]
    fn partitions_keep_insertion_order_internally() {
        let d = decisions(&[("z-first", "1"), ("a-second", "2"), ("m-third", "3")]);
        let selected = select_key_decisions(&d, None, 3);
        let labels: Vec<&str> = selected.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["z-first", "a-second", "m-third"]);
    }

    #[test]
    fn empty_epic_matches_nothing() {
        let d = decisions(&[("a", "1"), ("b", "2")]);
        let selected = select_key_decisions(&d, Some(""), 2);
        let labels: Vec<&str> = selected.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    // ── Truncation ─────────────────────────────────────────────────────

    #[test]
    fn truncation_cuts_to_cap_minus_three_with_ellipsis() {
        let long = "x".repeat(80);
        let cut = truncate_value(&long, 60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with("..."));

        let short = "fits as-is";
        assert_eq!(truncate_value(short, 60), short);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let value = "é".repeat(70);
        let cut = truncate_value(&value, 60);
        assert_eq!(cut.chars().count(), 60);
    }

    // ── Tier shapes ────────────────────────────────────────────────────

    #[test]
    fn minimal_scenario_render() {
        let out = render_minimal(&sample_doc());
        assert!(out.starts_with("# Focuskeeper Session"));
        assert!(out.contains("**Focus:** task - Add login"));
        assert!(out.contains("**Epic:** auth | **Task:** 3"));
        assert!(out.contains("- use-jwt: Use JWT for sessions"));
        assert!(out.contains("**Next:** Write tests"));
        assert!(!out.contains("Update docs"));
        assert!(out.ends_with(r#"> Say "load context" for full project details"#));
    }

    #[test]
    fn minimal_placeholders_for_missing_focus() {
        let out = render_minimal(&FocusDocument::default());
        assert!(out.contains("**Focus:** none - No active focus"));
        assert!(!out.contains("**Epic:**"));
    }

    #[test]
    fn empty_decisions_omit_heading_in_every_tier() {
        let doc = FocusDocument::default();
        for out in [
            render_minimal(&doc),
            render_standard(&doc, None),
            render_full(&doc, None, None),
            render_compaction_summary(&doc),
        ] {
            assert!(!out.contains("Key Decisions"), "unexpected heading in: {out}");
        }
    }

    #[test]
    fn standard_caps_criteria_work_and_tasks() {
        let mut doc = sample_doc();
        doc.session_summary.date = Some("2026-08-28".into());
        doc.session_summary.work_done =
            (1..=5).map(|i| format!("work item {i}")).collect();
        doc.next_session_tasks = (1..=5).map(|i| format!("task {i}")).collect();

        let task_doc: String = std::iter::once("## Acceptance Criteria".to_string())
            .chain((1..=8).map(|i| format!("- [ ] criterion {i}")))
            .collect::<Vec<_>>()
            .join("\n");

        let out = render_standard(&doc, Some(&task_doc));
        assert!(out.contains("criterion 5"));
        assert!(!out.contains("criterion 6"));
        assert!(out.contains("**Date:** 2026-08-28"));
        assert!(out.contains("work item 3"));
        assert!(!out.contains("work item 4"));
        assert!(out.contains("- task 3"));
        assert!(!out.contains("- task 4"));
    }

    #[test]
    fn standard_decisions_are_untruncated() {
        let mut doc = sample_doc();
        let long = "L".repeat(100);
        doc.key_decisions.insert("long".into(), long.clone());
        let out = render_standard(&doc, None);
        assert!(out.contains(&long));
    }

    #[test]
    fn full_includes_everything_and_status() {
        let mut doc = sample_doc();
        doc.current_focus.status = Some("in_progress".into());
        doc.session_summary.work_done = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        doc.key_decisions.insert("extra-1".into(), "v1".into());
        doc.key_decisions.insert("extra-2".into(), "v2".into());

        let out = render_full(&doc, None, None);
        assert!(out.starts_with("# Focuskeeper: Full Project Context"));
        assert!(out.contains("- **Status:** in_progress"));
        assert!(out.contains("extra-2"));
        assert!(out.contains("**Work Done:**"));
        assert!(out.contains("- d"));
        assert!(out.contains("- Update docs"));
    }

    #[test]
    fn full_takes_first_thirty_progress_lines_verbatim() {
        let progress: String = (1..=50)
            .map(|i| format!("progress line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let out = render_full(&sample_doc(), None, Some(&progress));
        assert!(out.contains("## Recent Progress"));
        assert!(out.contains("progress line 1\nprogress line 2"));
        assert!(out.contains("progress line 30"));
        assert!(!out.contains("progress line 31"));
    }

    #[test]
    fn blank_progress_log_omits_the_section() {
        for blank in ["", "  \n\n"] {
            let out = render_full(&sample_doc(), None, Some(blank));
            assert!(!out.contains("## Recent Progress"));
        }
    }

    // ── Compaction summary ─────────────────────────────────────────────

    #[test]
    fn compaction_summary_essentials() {
        let mut doc = sample_doc();
        doc.key_decisions
            .insert("third".into(), "never shown, limit is two".into());
        let out = render_compaction_summary(&doc);
        assert!(out.starts_with("## Focuskeeper Preserved"));
        assert!(out.contains("**Focus:** task - Add login"));
        assert!(out.contains("Epic: auth | Task: 3"));
        assert!(out.contains("- use-jwt:"));
        assert!(out.contains("- db:"));
        assert!(!out.contains("third"));
        assert!(out.contains("**Next:** Write tests"));
        assert!(out.ends_with("> Full context: `.project/context/focus.json`"));
    }

    #[test]
    fn compaction_summary_uses_tighter_cap() {
        let mut doc = FocusDocument::default();
        doc.key_decisions.insert("long".into(), "v".repeat(55));
        let out = render_compaction_summary(&doc);
        let line = out.lines().find(|l| l.starts_with("- long:")).unwrap();
        // "- long: " prefix + 47 chars + "..."
        assert!(line.ends_with("..."));
        assert_eq!(line.len(), "- long: ".len() + 50);
    }

    #[test]
    fn compaction_reminders_follow_config() {
        let mut doc = FocusDocument::default();
        doc.config.tdd_enforcement = Some("strict".into());
        doc.config.feature_dev_required = true;
        let out = render_compaction_summary(&doc);
        assert!(out.contains("**TDD:** Write tests before code"));
        assert!(out.contains("**Workflow:** Use /feature-dev for tasks"));

        doc.config.tdd_enforcement = Some("advisory".into());
        doc.config.feature_dev_required = false;
        let out = render_compaction_summary(&doc);
        assert!(!out.contains("**TDD:**"));
        assert!(!out.contains("**Workflow:**"));
    }

    #[test]
    fn compaction_omits_focus_block_when_type_none() {
        let mut doc = FocusDocument::default();
        doc.current_focus.kind = Some("none".into());
        doc.current_focus.name = Some("ignored".into());
        let out = render_compaction_summary(&doc);
        assert!(!out.contains("**Focus:**"));
    }

    // ── Dispatch ───────────────────────────────────────────────────────

    #[test]
    fn dispatch_requests_only_what_the_tier_needs() {
        let doc = sample_doc();
        let docs = StubDocs {
            task: Some("## Acceptance Criteria\n- [ ] visible criterion\n".into()),
            progress: Some("only the full tier shows this".into()),
        };

        let minimal = build_context(&doc, &docs, ContextLevel::Minimal);
        assert!(!minimal.contains("visible criterion"));

        let standard = build_context(&doc, &docs, ContextLevel::Standard);
        assert!(standard.contains("visible criterion"));
        assert!(!standard.contains("only the full tier"));

        let full = build_context(&doc, &docs, ContextLevel::Full);
        assert!(full.contains("visible criterion"));
        assert!(full.contains("only the full tier"));
    }

    #[test]
    fn dispatch_tolerates_absent_collaborator_documents() {
        let doc = sample_doc();
        let docs = StubDocs {
            task: None,
            progress: None,
        };
        let full = build_context(&doc, &docs, ContextLevel::Full);
        assert!(!full.contains("Active Task Criteria"));
        assert!(!full.contains("Recent Progress"));
    }

    #[test]
    fn renders_are_deterministic() {
        let doc = sample_doc();
        assert_eq!(render_minimal(&doc), render_minimal(&doc));
        assert_eq!(render_full(&doc, None, None), render_full(&doc, None, None));
    }
}
