//! `focuskeeper session-start` — the SessionStart hook.
//!
//! Flow: evict stale sessions, register this one, detect siblings, assemble
//! the configured context tier, append the one-time onboarding note and the
//! concurrency warning, persist once, emit the envelope.

use chrono::{DateTime, Utc};
use focuskeeper_context::build_context;
use focuskeeper_core::{FocusDocument, HookResponse, Onboarding, Result};
use focuskeeper_store::FocusStore;
use tracing::{debug, warn};

const ONBOARDING_NOTE: &str = "\
**Welcome to Focuskeeper.** No workflow integration is configured for this \
project yet. Session persistence and context injection are active; set \
`config.integrations.workflow` in `.project/context/focus.json` once a \
workflow plugin is in place, or continue with the core alone.";

pub async fn run() -> Result<()> {
    let payload = crate::payload::read().await;
    let cwd = crate::payload::working_dir(&payload)?;

    // Not a managed project: exit silently, no envelope.
    let Some(store) = FocusStore::open(&cwd) else {
        debug!(cwd = %cwd.display(), "Not a managed project");
        return Ok(());
    };

    let mut doc = store.read();
    if doc.is_empty() {
        debug!("Focus document uninitialized, nothing to inject");
        return Ok(());
    }

    let now = Utc::now();
    let session_id = payload.session_id();

    // Evict before registering so a fresh session is never counted as a
    // sibling of a stale one.
    focuskeeper_session::evict_stale(
        &mut doc,
        focuskeeper_session::STALE_THRESHOLD_MINUTES,
        now,
    );
    focuskeeper_session::register(&mut doc, session_id, now);

    let siblings = focuskeeper_session::active_siblings(
        &doc,
        session_id,
        focuskeeper_session::SIBLING_RECENCY_MINUTES,
        now,
    );
    let warning = focuskeeper_session::concurrency_warning(&siblings);

    let level = doc.context_level();
    let onboarding_note = mark_onboarding(&mut doc, now);

    let mut context = build_context(&doc, &store, level);
    if let Some(note) = onboarding_note {
        context.push('\n');
        context.push_str(note);
    }
    if let Some(warning) = warning {
        context.push('\n');
        context.push_str(&warning);
    }

    // Last-writer-wins: a lost registration only weakens an advisory
    // warning, never correctness.
    if let Err(e) = store.write(&doc) {
        warn!(error = %e, "Failed to persist session registration");
    }

    let response = HookResponse::with_context("SessionStart", context);
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Record that onboarding ran; return the note only on the very first
/// session of a project with no workflow integration configured.
fn mark_onboarding(doc: &mut FocusDocument, now: DateTime<Utc>) -> Option<&'static str> {
    if doc.onboarding.as_ref().is_some_and(|o| o.shown) {
        return None;
    }

    doc.onboarding = Some(Onboarding {
        shown: true,
        date: Some(now.format("%Y-%m-%d").to_string()),
    });

    if doc.config.integrations.workflow.is_some() {
        return None;
    }
    Some(ONBOARDING_NOTE)
}
