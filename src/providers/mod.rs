/*!
 * Provider implementations for translation services.
 *
 * This module contains the client side of the external translation API:
 * - Google: Google Cloud Translation v2 REST client
 * - Mock: In-process backend for tests and offline runs
 */

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One text to translate, in the wire shape the translation endpoint expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateRequest {
    /// Text to translate
    pub q: String,
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
    /// Input format, always "text" for page content
    pub format: String,
}

impl TranslateRequest {
    /// Create a plain-text translation request
    pub fn new(q: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            source: source.into(),
            target: target.into(),
            format: "text".to_string(),
        }
    }
}

/// Common trait for all translation backends
///
/// A backend performs exactly one request per call and reports every failure
/// as a `ProviderError`; fallback and caching are the caller's job.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate a single text
    ///
    /// # Arguments
    /// * `request` - The text and language pair to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The first translation result or an error
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError>;
}

pub mod google;
pub mod mock;
