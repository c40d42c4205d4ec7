//! File-backed Focus Document store.
//!
//! One pretty-printed JSON document per managed project at
//! `.project/context/focus.json`. Read-then-mutate-then-write is the only
//! supported pattern: `read` never fails (missing or malformed content
//! yields an empty document), `write` overwrites the full document. There
//! is no lock or version token — concurrent invocations race with
//! last-writer-wins semantics, accepted because the data is advisory.

use crate::locator::find_project_root;
use focuskeeper_core::{CurrentFocus, FocusDocument, ProjectDocuments, StoreError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the marker directory that anchors a managed project.
pub const MARKER_DIR: &str = ".project";

const FOCUS_FILE: &str = "focus.json";
const PROGRESS_FILE: &str = "progress.md";

/// Handle to one project's persisted focus state.
pub struct FocusStore {
    project_root: PathBuf,
}

impl FocusStore {
    /// Store for a known project root (the directory containing `.project`).
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Locate the managed project enclosing `cwd` and open its store.
    /// `None` means the directory is not inside a managed project.
    pub fn open(cwd: &Path) -> Option<Self> {
        find_project_root(cwd).map(Self::new)
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Path of the persisted document.
    pub fn focus_path(&self) -> PathBuf {
        self.project_root
            .join(MARKER_DIR)
            .join("context")
            .join(FOCUS_FILE)
    }

    /// Load the persisted document. A missing file or malformed content
    /// yields an empty document — callers treat empty as "uninitialized".
    pub fn read(&self) -> FocusDocument {
        let path = self.focus_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return FocusDocument::default(),
        };

        match serde_json::from_str(&content) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed focus document, treating as uninitialized");
                FocusDocument::default()
            }
        }
    }

    /// Serialize and persist the full document, overwriting prior content.
    /// Serialization is stable: writing back an unmodified read is a byte
    /// no-op for any document already in canonical form.
    pub fn write(&self, doc: &FocusDocument) -> Result<(), StoreError> {
        let path = self.focus_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let mut content =
            serde_json::to_string_pretty(doc).map_err(|e| StoreError::Serialize(e.to_string()))?;
        content.push('\n');

        // Write a sibling temp file and rename it into place so a failed
        // write never leaves a truncated document behind.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &content).map_err(|e| StoreError::Write {
            path: tmp.clone(),
            reason: e.to_string(),
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| StoreError::Write {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "Focus document written");
        Ok(())
    }
}

impl ProjectDocuments for FocusStore {
    /// The task description at `.project/epics/<epic>/<id>.md`, with the
    /// task id zero-padded to three digits ("3" → "003.md").
    fn active_task(&self, focus: &CurrentFocus) -> Option<String> {
        let epic = focus.epic.as_deref()?;
        let task = focus.task.as_deref()?;
        let path = self
            .project_root
            .join(MARKER_DIR)
            .join("epics")
            .join(epic)
            .join(format!("{task:0>3}.md"));
        std::fs::read_to_string(path).ok()
    }

    fn progress_log(&self) -> Option<String> {
        let path = self
            .project_root
            .join(MARKER_DIR)
            .join("context")
            .join(PROGRESS_FILE);
        std::fs::read_to_string(path).ok()
    }
}
