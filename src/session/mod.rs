/*!
 * Session management for page translation.
 *
 * This module provides:
 * - The language switch state machine
 * - Capture and restoration of the page's source text
 * - Startup language resolution and preference persistence
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::{TranslationSession, SWITCH_FAILED_NOTICE};
pub use models::{IgnoreReason, SessionState, SwitchOutcome, SwitchReport};
