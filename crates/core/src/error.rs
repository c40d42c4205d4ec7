//! Error types for the Focuskeeper domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Data-shape problems in
//! the persisted document are *not* errors — the store degrades them to an
//! empty document. Errors here cover persistence failures only, and even
//! those are logged by the entry points rather than surfaced to the host.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Focuskeeper operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from persisting the Focus Document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create state directory {path}: {reason}")]
    CreateDir { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Failed to serialize focus document: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_path_and_reason() {
        let err = Error::Store(StoreError::Write {
            path: PathBuf::from("/tmp/focus.json"),
            reason: "read-only filesystem".into(),
        });
        assert!(err.to_string().contains("focus.json"));
        assert!(err.to_string().contains("read-only"));
    }
}
