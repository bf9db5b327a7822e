/*!
 * # sitelingo - live page translation
 *
 * A Rust library for translating the text of a static web page on demand
 * through an external translation API.
 *
 * ## Features
 *
 * - Switch a page between its source language and any supported language
 * - Translate elements in bounded concurrent batches
 * - Coalesce identical texts into a single request
 * - Cache translations durably with a configurable expiry
 * - Fall back to the source text whenever a translation is unavailable
 * - Remember the visitor's language preference
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `session`: Language switch state machine and startup sequence
 * - `translation`: Text translation services:
 *   - `translation::core`: Single-text translation with fallback
 *   - `translation::batch`: Batched translation with request coalescing
 *   - `translation::cache`: Write-through translation cache
 * - `document`: Page boundary and the JSON `StaticPage` document
 * - `storage`: Durable key/value slots
 * - `language_utils`: ISO language code utilities
 * - `providers`: Translation API clients:
 *   - `providers::google`: Google Cloud Translation v2 client
 *   - `providers::mock`: In-process backend for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod document;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod storage;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{Document, StaticPage};
pub use session::{SwitchOutcome, SwitchReport, TranslationSession};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use translation::TranslationCache;
pub use language_utils::{get_language_name, language_codes_match, primary_subtag};
pub use errors::{DocumentError, ProviderError, SessionError, StorageError};
