/*!
 * Session-specific models.
 *
 * These structures describe the state of a translation session and the
 * result of a language switch request.
 */

use serde::Serialize;

use crate::translation::BatchStats;

/// Language switch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No switch in progress
    Idle,
    /// A switch is translating or restoring the page
    Switching,
}

/// Why a switch request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The page already shows the requested language
    AlreadyActive,
    /// Another switch is still running
    Busy,
}

/// Result of a language switch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SwitchOutcome {
    /// The page now shows the requested language
    Completed(SwitchReport),
    /// The request was rejected without touching any state
    Ignored {
        /// Requested language
        requested: String,
        /// Why it was rejected
        reason: IgnoreReason,
    },
}

impl SwitchOutcome {
    /// The report of a completed switch
    pub fn report(&self) -> Option<&SwitchReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Ignored { .. } => None,
        }
    }

    /// Whether the request was rejected
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }
}

/// Summary of a completed switch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SwitchReport {
    /// Language the page was in before the switch
    pub from_language: String,
    /// Language the page is in now
    pub to_language: String,
    /// Whether this switch restored the source text
    pub restored: bool,
    /// Translatable elements found on the page
    pub elements: usize,
    /// Elements whose original text was put back (restore only)
    pub restored_elements: usize,
    /// Batches issued (translation only)
    pub batches: usize,
    /// Per-text counters across all batches (translation only)
    pub stats: BatchStats,
}
