/*!
 * Core text translation.
 *
 * `TextTranslator` turns one source-language string into its translation:
 * cache first, then the backend, and the source text itself whenever the
 * translation cannot be obtained.
 */

use log::{error, warn};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{TranslateRequest, TranslationBackend};
use super::cache::TranslationCache;

/// Why a text was left in the source language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No usable API key is configured
    MissingCredential,
    /// The request or the service failed
    Provider(String),
}

/// Result of translating a single text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOutcome {
    /// Empty or whitespace-only input, returned as is
    Blank(String),
    /// Served from the cache
    Cached(String),
    /// Fetched from the backend and cached
    Translated(String),
    /// Translation unavailable, carries the source text
    Fallback {
        /// The untranslated source text
        text: String,
        /// What went wrong
        reason: FallbackReason,
    },
}

impl TextOutcome {
    /// Text to display for this outcome
    pub fn text(&self) -> &str {
        match self {
            Self::Blank(text) | Self::Cached(text) | Self::Translated(text) => text,
            Self::Fallback { text, .. } => text,
        }
    }

    /// Consume the outcome, keeping only the display text
    pub fn into_text(self) -> String {
        match self {
            Self::Blank(text) | Self::Cached(text) | Self::Translated(text) => text,
            Self::Fallback { text, .. } => text,
        }
    }

    /// Whether the text fell back to the source language
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Translates single texts with caching and graceful fallback
#[derive(Clone)]
pub struct TextTranslator {
    /// Backend performing the actual requests
    backend: Arc<dyn TranslationBackend>,

    /// Shared translation cache
    cache: TranslationCache,

    /// Language the page is authored in
    source_language: String,

    /// Whether a real API key is configured
    has_credential: bool,
}

impl TextTranslator {
    /// Create a new translator
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        cache: TranslationCache,
        source_language: impl Into<String>,
        has_credential: bool,
    ) -> Self {
        Self {
            backend,
            cache,
            source_language: source_language.into(),
            has_credential,
        }
    }

    /// Translate `text` into `target_language`, returning the source text on any failure
    pub async fn translate_text(&self, text: &str, target_language: &str) -> String {
        self.translate(text, target_language).await.into_text()
    }

    /// Translate `text` and report how the result was obtained
    pub async fn translate(&self, text: &str, target_language: &str) -> TextOutcome {
        if text.trim().is_empty() {
            return TextOutcome::Blank(text.to_string());
        }

        if let Some(cached) = self.cache.get(text, target_language) {
            return TextOutcome::Cached(cached);
        }

        if !self.has_credential {
            warn!("Translation API key is not configured; keeping source text");
            return TextOutcome::Fallback {
                text: text.to_string(),
                reason: FallbackReason::MissingCredential,
            };
        }

        match self.fetch(text, target_language).await {
            Ok(translated) => {
                self.cache.store(text, target_language, &translated);
                TextOutcome::Translated(translated)
            }
            Err(e) => {
                error!("Translation to '{}' failed: {}", target_language, e);
                TextOutcome::Fallback {
                    text: text.to_string(),
                    reason: FallbackReason::Provider(e.to_string()),
                }
            }
        }
    }

    async fn fetch(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let request = TranslateRequest::new(text, &self.source_language, target_language);
        self.backend.translate(&request).await
    }

    /// The shared cache
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Language translations originate from
    pub fn source_language(&self) -> &str {
        &self.source_language
    }
}
