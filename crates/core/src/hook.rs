//! Hook wire types — the host's stdin payload and stdout envelope.
//!
//! The host sends a snake_case JSON payload on stdin and expects a
//! camelCase envelope on stdout with the assembled text under an
//! event-specific key (`additionalContext` at session start,
//! `systemMessage` at pre-compact, nothing at stop).

use serde::{Deserialize, Serialize};

/// The invocation payload, parsed from stdin. Every field is optional:
/// an absent or malformed payload degrades to [`HookPayload::default`]
/// and the entry point fills in the working directory itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookPayload {
    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default)]
    pub cwd: Option<String>,

    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// How the session was started (e.g. "startup", "resume").
    #[serde(default)]
    pub source: Option<String>,
}

impl HookPayload {
    /// The session id, or the fixed fallback for payloads without one.
    pub fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or("unknown")
    }
}

/// The response envelope written to stdout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResponse {
    pub hook_specific_output: HookOutput,
}

/// The event-specific body of the envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_event_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

impl HookResponse {
    /// An envelope with no attached text (stop, or a not-managed project).
    pub fn bare(event: &str) -> Self {
        Self {
            hook_specific_output: HookOutput {
                hook_event_name: event.to_string(),
                additional_context: None,
                system_message: None,
            },
        }
    }

    /// A SessionStart envelope carrying assembled context.
    pub fn with_context(event: &str, context: String) -> Self {
        Self {
            hook_specific_output: HookOutput {
                hook_event_name: event.to_string(),
                additional_context: Some(context),
                system_message: None,
            },
        }
    }

    /// A PreCompact envelope carrying the preserved-state summary.
    pub fn with_system_message(event: &str, message: String) -> Self {
        Self {
            hook_specific_output: HookOutput {
                hook_event_name: event.to_string(),
                additional_context: None,
                system_message: Some(message),
            },
        }
    }
}
