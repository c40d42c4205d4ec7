//! # Focuskeeper Core
//!
//! Domain types for the Focuskeeper session-state hooks. This crate defines
//! the canonical Focus Document schema, the hook wire types, and the seams
//! the other crates implement against. It has no I/O of its own.
//!
//! ## Design Philosophy
//!
//! Every optional field of the persisted document gets its default resolved
//! once, at deserialization time. Consumers work with fully-resolved types
//! and never re-derive defaults at the use site.

pub mod document;
pub mod error;
pub mod hook;

// Re-export key types at crate root for ergonomics
pub use document::{
    ContextLevel, CurrentFocus, FocusConfig, FocusDocument, Integrations, MemoryContext,
    Onboarding, SessionEntry, SessionSummary,
};
pub use error::{Error, Result, StoreError};
pub use hook::{HookOutput, HookPayload, HookResponse};

/// Collaborator-supplied project documents consumed by the context tiers.
///
/// The standard tier needs the active task description; the full tier also
/// needs the running progress log. Both may legitimately be absent, and a
/// document that fails to load is treated as absent rather than an error.
pub trait ProjectDocuments {
    /// Free-text description of the currently focused task, if resolvable.
    fn active_task(&self, focus: &CurrentFocus) -> Option<String>;

    /// The project's running progress log, if present.
    fn progress_log(&self) -> Option<String>;
}
