//! Project locator — finds the marker directory that anchors a managed
//! project.

use crate::store::MARKER_DIR;
use std::path::{Path, PathBuf};

/// Walk `start` and each ancestor until the filesystem root, looking for
/// the `.project` marker directory. Returns the project root (the
/// directory containing the marker), or `None` if the walk reaches the
/// root without a match. No side effects; terminates in at most
/// path-depth steps.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(MARKER_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
