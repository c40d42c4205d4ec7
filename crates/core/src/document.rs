//! The Focus Document — the single persisted state record per managed project.
//!
//! One canonical schema with every default resolved at load time. Two shape
//! rules matter for durability:
//!
//! - Unknown top-level fields are captured in [`FocusDocument::extra`] and
//!   written back verbatim, so a read-modify-write cycle from an older
//!   binary never drops fields a newer one added.
//! - `key_decisions` and `active_sessions` deserialize *leniently*: a
//!   malformed shape in either becomes an empty map instead of failing the
//!   whole document.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// The persisted focus state for a managed project.
///
/// An all-default document means "not yet initialized"; every consumer
/// checks [`FocusDocument::is_empty`] and degrades to neutral output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusDocument {
    /// The unit of work currently in progress.
    #[serde(default, skip_serializing_if = "CurrentFocus::is_empty")]
    pub current_focus: CurrentFocus,

    /// Decision label → free-text value. Insertion order is preserved so
    /// renders are deterministic; size is unbounded in storage.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub key_decisions: IndexMap<String, String>,

    /// The single most-recent session record, overwritten wholesale.
    #[serde(default, skip_serializing_if = "SessionSummary::is_empty")]
    pub session_summary: SessionSummary,

    /// Ordered task list for the next session; first = highest priority.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_session_tasks: Vec<String>,

    /// Operator-set preferences.
    #[serde(default, skip_serializing_if = "FocusConfig::is_default")]
    pub config: FocusConfig,

    /// Session id → registration entry. Staleness is derived at query time
    /// from `last_active`, never stored.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub active_sessions: IndexMap<String, SessionEntry>,

    /// State preserved at the last memory compaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_context: Option<MemoryContext>,

    /// One-time onboarding marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding: Option<Onboarding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Unknown top-level fields, carried through read-modify-write.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FocusDocument {
    /// True when nothing has ever been recorded (uninitialized project).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The render tier selected by operator config. Unrecognized or absent
    /// values fall back to [`ContextLevel::Minimal`].
    pub fn context_level(&self) -> ContextLevel {
        self.config
            .context_level
            .as_deref()
            .map(ContextLevel::parse)
            .unwrap_or_default()
    }
}

/// The unit of work currently in progress. Absence of `kind`/`name` is
/// valid and renders as "no active focus".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentFocus {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,

    /// Task identifier within the epic. Older writers stored this as a bare
    /// number, so both JSON strings and numbers are accepted.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub task: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CurrentFocus {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single most-recent-session record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub work_done: Vec<String>,
}

impl SessionSummary {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.work_done.is_empty()
    }
}

/// Registration entry for one active assistant session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub started_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// Operator-set preferences, read-only to the hooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusConfig {
    #[serde(default, skip_serializing_if = "Integrations::is_empty")]
    pub integrations: Integrations,

    /// `"strict"` enables a fixed TDD reminder in the compaction summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdd_enforcement: Option<String>,

    /// Enables a fixed workflow reminder in the compaction summary.
    #[serde(default)]
    pub feature_dev_required: bool,

    /// Render tier: "minimal" (default), "standard", or "full".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_level: Option<String>,
}

impl FocusConfig {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Detected third-party integration display strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Integrations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdd: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_analysis: Option<String>,
}

impl Integrations {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// State snapshot written before a memory compaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryContext {
    pub last_compaction: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserved_focus: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserved_epic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserved_task: Option<String>,
}

/// One-time onboarding marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Onboarding {
    #[serde(default)]
    pub shown: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// One of the three fixed-shape render tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContextLevel {
    #[default]
    Minimal,
    Standard,
    Full,
}

impl ContextLevel {
    /// Parse an operator-supplied level string. Anything unrecognized
    /// falls back to `Minimal`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Self::Standard,
            "full" => Self::Full,
            _ => Self::Minimal,
        }
    }
}

/// Deserialize a field tolerantly: a shape that does not match the target
/// type becomes the type's default instead of failing the whole document.
///
/// Buffers through `serde_json::Value`; stored key order must survive that
/// buffer, which requires serde_json's `preserve_order` feature.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match T::deserialize(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::warn!(error = %e, "Malformed field shape in focus document, treating as empty");
            Ok(T::default())
        }
    }
}

/// Accept a task id written as either a JSON string or a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
