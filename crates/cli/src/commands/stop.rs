//! `focuskeeper stop` — the Stop hook.
//!
//! Runs between every assistant response, so this path stays minimal: one
//! read, at most one write, no context assembly. Only sessions that are
//! already registered get touched — stop never inserts.

use chrono::Utc;
use focuskeeper_core::{HookResponse, Result};
use focuskeeper_store::FocusStore;
use tracing::{debug, warn};

pub async fn run() -> Result<()> {
    let payload = crate::payload::read().await;
    let cwd = crate::payload::working_dir(&payload)?;

    let Some(store) = FocusStore::open(&cwd) else {
        debug!(cwd = %cwd.display(), "Not a managed project");
        return Ok(());
    };

    let mut doc = store.read();
    if doc.is_empty() {
        return Ok(());
    }

    if focuskeeper_session::touch(&mut doc, payload.session_id(), Utc::now()) {
        if let Err(e) = store.write(&doc) {
            warn!(error = %e, "Failed to persist session touch");
        }
    }

    let response = HookResponse::bare("Stop");
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
