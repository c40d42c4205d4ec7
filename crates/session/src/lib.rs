//! # Focuskeeper Session Registry
//!
//! Tracks one entry per active assistant session inside the Focus Document
//! (`active_sessions`), detects sibling sessions within a recency window,
//! and evicts entries inactive beyond a staleness threshold.
//!
//! Every operation is a pure function over the in-memory document and never
//! fails — a malformed `active_sessions` shape was already folded to empty
//! at deserialization time. Eviction and sibling detection are best-effort
//! heuristics for advisory warnings, not mutual exclusion: concurrent
//! invocations race on the single document with last-writer-wins writes.
//!
//! Operations take an explicit `now` so behavior is deterministic in tests;
//! entry points pass `Utc::now()`.

use chrono::{DateTime, Duration, Utc};
use focuskeeper_core::{FocusDocument, SessionEntry};
use tracing::debug;

/// Default staleness threshold applied at session start, in minutes.
pub const STALE_THRESHOLD_MINUTES: i64 = 60;

/// Default sibling-recency window, in minutes.
pub const SIBLING_RECENCY_MINUTES: i64 = 30;

/// Insert or refresh the entry for `session_id`. A new session gets
/// `started_at = last_active = now`; an existing one keeps its
/// `started_at` and only refreshes `last_active`. Idempotent per call.
pub fn register(doc: &mut FocusDocument, session_id: &str, now: DateTime<Utc>) {
    match doc.active_sessions.get_mut(session_id) {
        Some(entry) => entry.last_active = now,
        None => {
            doc.active_sessions.insert(
                session_id.to_string(),
                SessionEntry {
                    started_at: now,
                    last_active: now,
                },
            );
        }
    }
}

/// Refresh `last_active` for an existing entry. Deliberately *not* an
/// insert: a caller must only touch sessions it already knows are
/// registered. Returns whether an entry was updated.
pub fn touch(doc: &mut FocusDocument, session_id: &str, now: DateTime<Utc>) -> bool {
    match doc.active_sessions.get_mut(session_id) {
        Some(entry) => {
            entry.last_active = now;
            true
        }
        None => false,
    }
}

/// Remove every entry whose `last_active` age exceeds `threshold_minutes`.
/// Runs before [`register`] in the session-start flow so a fresh session is
/// never counted as a sibling of a stale one. Returns the eviction count.
pub fn evict_stale(doc: &mut FocusDocument, threshold_minutes: i64, now: DateTime<Utc>) -> usize {
    let cutoff = now - Duration::minutes(threshold_minutes);
    let before = doc.active_sessions.len();
    doc.active_sessions.retain(|_, entry| entry.last_active >= cutoff);
    let evicted = before - doc.active_sessions.len();
    if evicted > 0 {
        debug!(evicted, threshold_minutes, "Evicted stale sessions");
    }
    evicted
}

/// Ids of every session other than `self_id` whose `last_active` is within
/// `recency_minutes`. Used purely for advisory concurrency warnings.
pub fn active_siblings(
    doc: &FocusDocument,
    self_id: &str,
    recency_minutes: i64,
    now: DateTime<Utc>,
) -> Vec<String> {
    let cutoff = now - Duration::minutes(recency_minutes);
    doc.active_sessions
        .iter()
        .filter(|(id, entry)| id.as_str() != self_id && entry.last_active >= cutoff)
        .map(|(id, _)| id.clone())
        .collect()
}

/// A fixed advisory warning for concurrent sessions on the same project,
/// or `None` when there are no siblings.
pub fn concurrency_warning(siblings: &[String]) -> Option<String> {
    if siblings.is_empty() {
        return None;
    }
    let noun = if siblings.len() == 1 {
        "session is"
    } else {
        "sessions are"
    };
    Some(format!(
        "⚠️ **Concurrent sessions:** {} other {} active on this project. \
         Focus state uses last-writer-wins; coordinate before updating it.",
        siblings.len(),
        noun
    ))
}
