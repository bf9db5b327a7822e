/*!
 * Session manager for page language switching.
 *
 * This module handles:
 * - Resolving the initial page language at startup
 * - Switching the page between the source language and translations
 * - Rejecting overlapping switches
 * - Persisting the visitor's language preference
 */

use log::{debug, error, info, warn};
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::app_config::Config;
use crate::document::Document;
use crate::errors::{DocumentError, SessionError};
use crate::language_utils::{language_codes_match, primary_subtag};
use crate::providers::google::GoogleTranslate;
use crate::providers::TranslationBackend;
use crate::storage::{KeyValueStore, LANGUAGE_SLOT};
use crate::translation::{BatchTranslator, TextTranslator, TranslationCache};

use super::models::{IgnoreReason, SessionState, SwitchOutcome, SwitchReport};

/// Notice shown to the visitor when a switch fails
pub const SWITCH_FAILED_NOTICE: &str = "Translation failed. Please try again.";

/// Translation session owning the language state, the cache and the page
pub struct TranslationSession<D: Document> {
    /// Configuration the session was built with
    config: Config,

    /// The page being translated
    document: Mutex<D>,

    /// Durable store for the preference (the cache holds its own handle)
    store: Arc<dyn KeyValueStore>,

    /// Batched translator sharing the session cache
    batch: BatchTranslator,

    /// Language the page currently shows
    current_language: RwLock<String>,

    /// Set while a switch is running
    busy: AtomicBool,

    /// Source text per element id, captured on first translation
    originals: Mutex<HashMap<String, String>>,
}

/// Releases the busy flag and re-enables the controls when a switch ends
struct SwitchGuard<'a, D: Document> {
    busy: &'a AtomicBool,
    document: &'a Mutex<D>,
}

impl<D: Document> Drop for SwitchGuard<'_, D> {
    fn drop(&mut self) {
        self.document.lock().set_controls_enabled(true);
        self.busy.store(false, Ordering::SeqCst);
    }
}

impl<D: Document> TranslationSession<D> {
    /// Create a session, loading the translation cache from `store`
    ///
    /// The page must be authored in the configured source language; a page
    /// declaring any other language is rejected.
    pub fn new(
        config: Config,
        document: D,
        backend: Arc<dyn TranslationBackend>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, SessionError> {
        let page_language = document.page_language();
        let declared = !page_language.trim().is_empty();
        if declared && !language_codes_match(&page_language, &config.default_language) {
            return Err(SessionError::SourceMismatch {
                page_language,
                source_language: config.default_language.clone(),
            });
        }

        let cache = TranslationCache::load(store.clone(), config.cache_expiry_ms);
        let translator = TextTranslator::new(
            backend,
            cache,
            config.default_language.clone(),
            config.translation.has_credential(),
        );
        let batch = BatchTranslator::new(translator, config.translation.batch_size);

        Ok(Self {
            current_language: RwLock::new(config.default_language.clone()),
            config,
            document: Mutex::new(document),
            store,
            batch,
            busy: AtomicBool::new(false),
            originals: Mutex::new(HashMap::new()),
        })
    }

    /// Create a session backed by the Google translation API
    pub fn with_google(
        config: Config,
        document: D,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, SessionError> {
        let backend = Arc::new(GoogleTranslate::from_config(&config.translation));
        Self::new(config, document, backend, store)
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// UI entry point: switch the page language, reporting failures on the page
    ///
    /// Returns the report of a completed switch, `None` when the request was
    /// ignored or failed.
    pub async fn change_language(&self, code: &str) -> Option<SwitchReport> {
        match self.switch_language(code).await {
            Ok(SwitchOutcome::Completed(report)) => Some(report),
            Ok(SwitchOutcome::Ignored { requested, reason }) => {
                debug!("Ignoring switch to '{}': {:?}", requested, reason);
                None
            }
            Err(e) => {
                error!("Language switch to '{}' failed: {}", code, e);
                self.document.lock().show_notice(SWITCH_FAILED_NOTICE);
                None
            }
        }
    }

    /// Resolve the initial language and bring the page into it
    pub async fn start(&self, browser_locale: Option<&str>) -> Result<SwitchOutcome, SessionError> {
        let initial = self.resolve_initial_language(browser_locale);
        info!("Initial page language: {}", initial);

        if initial != self.config.default_language {
            return self.switch_language(&initial).await;
        }

        self.mark_active_language(&initial);
        Ok(SwitchOutcome::Ignored {
            requested: initial,
            reason: IgnoreReason::AlreadyActive,
        })
    }

    /// Stored preference, else the browser locale, else the default language
    pub fn resolve_initial_language(&self, browser_locale: Option<&str>) -> String {
        let stored = match self.store.get(LANGUAGE_SLOT) {
            Ok(value) => value.map(|v| v.trim().to_string()),
            Err(e) => {
                warn!("Failed to read language preference: {}", e);
                None
            }
        };

        if let Some(code) = stored.filter(|code| self.config.is_supported(code)) {
            return code;
        }

        if let Some(code) = browser_locale
            .and_then(primary_subtag)
            .filter(|code| self.config.is_supported(code))
        {
            return code;
        }

        self.config.default_language.clone()
    }

    // =========================================================================
    // Switching
    // =========================================================================

    /// Switch the page to `target`
    ///
    /// The default language restores the captured originals; any other
    /// supported language translates every element batch by batch. Requests
    /// for the current language, or made while another switch runs, are
    /// ignored. On error the current language is left unchanged.
    pub async fn switch_language(&self, target: &str) -> Result<SwitchOutcome, SessionError> {
        if !self.config.is_supported(target) {
            return Err(SessionError::UnsupportedLanguage(target.to_string()));
        }

        if self.busy.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
            return Ok(SwitchOutcome::Ignored {
                requested: target.to_string(),
                reason: IgnoreReason::Busy,
            });
        }
        let _guard = SwitchGuard {
            busy: &self.busy,
            document: &self.document,
        };

        let from_language = self.current_language();
        if from_language == target {
            return Ok(SwitchOutcome::Ignored {
                requested: target.to_string(),
                reason: IgnoreReason::AlreadyActive,
            });
        }

        self.document.lock().set_controls_enabled(false);
        info!("Switching page language {} -> {}", from_language, target);

        let mut report = if target == self.config.default_language {
            self.restore_originals()?
        } else {
            self.translate_page(target).await?
        };
        report.from_language = from_language;
        report.to_language = target.to_string();

        self.finish_switch(target);
        Ok(SwitchOutcome::Completed(report))
    }

    async fn translate_page(&self, target: &str) -> Result<SwitchReport, SessionError> {
        let element_ids = self.document.lock().translatable_elements();
        let total_batches = element_ids.len().div_ceil(self.batch.batch_size());

        let mut report = SwitchReport {
            elements: element_ids.len(),
            ..SwitchReport::default()
        };

        for (index, chunk) in element_ids.chunks(self.batch.batch_size()).enumerate() {
            let sources = self.capture_originals(chunk)?;
            let (outcomes, stats) = self.batch.translate_batch(&sources, target).await;

            {
                let mut document = self.document.lock();
                for (id, outcome) in chunk.iter().zip(&outcomes) {
                    document.set_text(id, outcome.text())?;
                }
            }

            debug!("Applied batch {} of {} ({} fallbacks)", index + 1, total_batches, stats.fallbacks);
            report.batches += 1;
            report.stats.merge(&stats);
        }

        if report.stats.fallbacks > 0 {
            warn!("{} of {} elements kept their source text", report.stats.fallbacks, report.elements);
        }

        Ok(report)
    }

    /// Source text for each element, recording it the first time an element is seen
    fn capture_originals(&self, ids: &[String]) -> Result<Vec<String>, DocumentError> {
        let document = self.document.lock();
        let mut originals = self.originals.lock();
        let mut sources = Vec::with_capacity(ids.len());

        for id in ids {
            let source = match originals.get(id) {
                Some(original) => original.clone(),
                None => {
                    let text = document.text(id)?;
                    originals.insert(id.clone(), text.clone());
                    text
                }
            };
            sources.push(source);
        }

        Ok(sources)
    }

    fn restore_originals(&self) -> Result<SwitchReport, SessionError> {
        let mut document = self.document.lock();
        let originals = self.originals.lock();
        let element_ids = document.translatable_elements();

        let mut restored_elements = 0;
        for id in &element_ids {
            if let Some(original) = originals.get(id) {
                document.set_text(id, original)?;
                restored_elements += 1;
            }
        }

        Ok(SwitchReport {
            restored: true,
            elements: element_ids.len(),
            restored_elements,
            ..SwitchReport::default()
        })
    }

    fn finish_switch(&self, target: &str) {
        *self.current_language.write() = target.to_string();
        self.mark_active_language(target);

        if let Err(e) = self.store.set(LANGUAGE_SLOT, target) {
            warn!("Failed to persist language preference: {}", e);
        }
    }

    /// Mark exactly the control for `code` active and set the page language
    fn mark_active_language(&self, code: &str) {
        let mut document = self.document.lock();
        for control in document.language_controls() {
            document.set_control_active(&control, control == code);
        }
        document.set_page_language(code);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Translate a single text with the session cache and fallback rules
    pub async fn translate_text(&self, text: &str, target_language: &str) -> String {
        self.batch.translator().translate_text(text, target_language).await
    }

    /// Language the page currently shows
    pub fn current_language(&self) -> String {
        self.current_language.read().clone()
    }

    /// Whether a switch is running
    pub fn state(&self) -> SessionState {
        if self.busy.load(Ordering::SeqCst) {
            SessionState::Switching
        } else {
            SessionState::Idle
        }
    }

    /// Captured source text of an element, if it was ever translated
    pub fn original_text(&self, id: &str) -> Option<String> {
        self.originals.lock().get(id).cloned()
    }

    /// The session's translation cache
    pub fn cache(&self) -> &TranslationCache {
        self.batch.translator().cache()
    }

    /// The configuration the session was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lock the document for inspection
    pub fn document(&self) -> MutexGuard<'_, D> {
        self.document.lock()
    }

    /// Give the document back to its owner
    pub fn into_document(self) -> D {
        self.document.into_inner()
    }
}
