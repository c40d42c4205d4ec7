//! Hook payload acquisition from stdin.
//!
//! Stop runs between every assistant response, so input acquisition is
//! bounded: if the host supplies nothing within the timeout, the command
//! proceeds with defaults instead of blocking.

use focuskeeper_core::{Error, HookPayload, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::debug;

const STDIN_TIMEOUT_MS: u64 = 250;

/// Read and parse the JSON payload from stdin. An empty, slow, or
/// malformed payload degrades to [`HookPayload::default`].
pub async fn read() -> HookPayload {
    let mut input = String::new();
    let read = tokio::time::timeout(
        Duration::from_millis(STDIN_TIMEOUT_MS),
        tokio::io::stdin().read_to_string(&mut input),
    )
    .await;

    match read {
        Ok(Ok(_)) if !input.trim().is_empty() => {
            serde_json::from_str(&input).unwrap_or_else(|e| {
                debug!(error = %e, "Malformed hook payload, using defaults");
                HookPayload::default()
            })
        }
        _ => HookPayload::default(),
    }
}

/// The working directory to resolve the project from: the payload's `cwd`
/// when present, otherwise the process working directory. Failing to
/// determine either is the one unrecoverable environment fault.
pub fn working_dir(payload: &HookPayload) -> Result<PathBuf> {
    match &payload.cwd {
        Some(cwd) => Ok(PathBuf::from(cwd)),
        None => std::env::current_dir()
            .map_err(|e| Error::Internal(format!("Cannot determine working directory: {e}"))),
    }
}
