//! # Focuskeeper Store
//!
//! The project locator and the file-backed Focus Document store. This crate
//! exclusively owns the on-disk representation; every other crate works on
//! an in-memory [`FocusDocument`](focuskeeper_core::FocusDocument) handed
//! to it by an entry point, which persists the result through
//! [`FocusStore::write`].

mod locator;
mod store;

pub use locator::find_project_root;
pub use store::{FocusStore, MARKER_DIR};
