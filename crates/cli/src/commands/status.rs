//! `focuskeeper status` — operator report of the current focus state.
//!
//! Not a hook: reads the project from the process working directory and
//! prints a human-readable summary to stdout.

use chrono::Utc;
use focuskeeper_core::{Error, Result};
use focuskeeper_store::FocusStore;

pub async fn run() -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| Error::Internal(format!("Cannot determine working directory: {e}")))?;

    let Some(store) = FocusStore::open(&cwd) else {
        println!("Not inside a managed project (no `.project` directory found).");
        return Ok(());
    };

    let doc = store.read();

    println!("Focuskeeper Status");
    println!("==================");
    println!("  Project:       {}", store.project_root().display());
    println!("  State file:    {}", store.focus_path().display());

    if doc.is_empty() {
        println!("\n  Focus state not yet initialized.");
        return Ok(());
    }

    let cf = &doc.current_focus;
    println!(
        "  Focus:         {} - {}",
        cf.kind.as_deref().unwrap_or("none"),
        cf.name.as_deref().unwrap_or("No active focus")
    );
    if let Some(epic) = &cf.epic {
        println!("  Epic:          {epic}");
    }
    if let Some(task) = &cf.task {
        println!("  Task:          {task}");
    }
    println!("  Context level: {:?}", doc.context_level());
    println!("  Key decisions: {}", doc.key_decisions.len());
    println!("  Next tasks:    {}", doc.next_session_tasks.len());

    let now = Utc::now();
    let recent = focuskeeper_session::active_siblings(
        &doc,
        "",
        focuskeeper_session::SIBLING_RECENCY_MINUTES,
        now,
    );
    println!(
        "  Sessions:      {} registered, {} active in the last {} min",
        doc.active_sessions.len(),
        recent.len(),
        focuskeeper_session::SIBLING_RECENCY_MINUTES
    );

    if let Some(mc) = &doc.memory_context {
        println!("  Last compact:  {}", mc.last_compaction);
    }
    if let Some(updated) = &doc.last_updated {
        println!("  Last updated:  {updated}");
    }

    Ok(())
}
