//! `focuskeeper pre-compact` — the PreCompact hook.
//!
//! Records what the current focus was at compaction time, persists, and
//! returns a short system message so the essentials survive the
//! compaction. Unlike session-start, this hook always answers with an
//! envelope — the host expects one even for unmanaged projects.

use chrono::Utc;
use focuskeeper_context::render_compaction_summary;
use focuskeeper_core::{FocusDocument, HookResponse, MemoryContext, Result};
use focuskeeper_store::FocusStore;
use tracing::warn;

const EVENT: &str = "PreCompact";

pub async fn run() -> Result<()> {
    let payload = crate::payload::read().await;
    let cwd = crate::payload::working_dir(&payload)?;

    let Some(store) = FocusStore::open(&cwd) else {
        return emit(HookResponse::bare(EVENT));
    };

    let mut doc = store.read();
    if doc.is_empty() {
        return emit(HookResponse::bare(EVENT));
    }

    record_compaction(&mut doc);
    if let Err(e) = store.write(&doc) {
        warn!(error = %e, "Failed to persist compaction context");
    }

    let summary = render_compaction_summary(&doc);
    emit(HookResponse::with_system_message(EVENT, summary))
}

/// Snapshot the focus identifiers so a later session can tell what the
/// assistant was working on when its memory was compacted.
fn record_compaction(doc: &mut FocusDocument) {
    let now = Utc::now();
    doc.memory_context = Some(MemoryContext {
        last_compaction: now,
        preserved_focus: doc.current_focus.name.clone(),
        preserved_epic: doc.current_focus.epic.clone(),
        preserved_task: doc.current_focus.task.clone(),
    });
    doc.last_updated = Some(now);
}

fn emit(response: HookResponse) -> Result<()> {
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
