//! # Focuskeeper Context
//!
//! The tiered context-assembly engine: selects and truncates a bounded
//! subset of accumulated focus state into one of three fixed token-budget
//! tiers, plus the compaction-time summary. Collaborator documents (active
//! task text, progress log) arrive through the
//! [`ProjectDocuments`](focuskeeper_core::ProjectDocuments) seam.

mod assembler;
mod criteria;

pub use assembler::{
    build_context, render_compaction_summary, render_full, render_minimal, render_standard,
    select_key_decisions,
};
pub use criteria::extract_acceptance_criteria;
