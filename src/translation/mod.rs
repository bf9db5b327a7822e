/*!
 * Translation of page text through the external translation API.
 *
 * This module is split into several submodules:
 *
 * - `core`: Single-text translation with cache lookup and fallback
 * - `batch`: Batched, coalesced translation of many texts
 * - `cache`: Write-through translation cache with expiry
 */

// Re-export main types for easier usage
pub use self::batch::{BatchStats, BatchTranslator};
pub use self::cache::TranslationCache;
pub use self::core::{FallbackReason, TextOutcome, TextTranslator};

// Submodules
pub mod batch;
pub mod cache;
pub mod core;
