/*!
 * Batch translation processing.
 *
 * Texts are translated in fixed-size batches. Inside a batch every distinct
 * text is requested once and all requests run concurrently; the batch
 * settles only when each of them has succeeded or fallen back. The caller
 * issues the next batch after that, so no more than `batch_size` requests
 * are ever outstanding.
 */

use futures::future::join_all;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

use super::core::{TextOutcome, TextTranslator};

/// Counters for one or more settled batches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// Texts processed
    pub texts: usize,
    /// Distinct non-blank texts handed to the translator
    pub unique_texts: usize,
    /// Texts served from the cache
    pub cache_hits: usize,
    /// Texts freshly translated
    pub translated: usize,
    /// Texts left in the source language after a failure
    pub fallbacks: usize,
    /// Empty or whitespace-only texts
    pub blank: usize,
}

impl BatchStats {
    /// Count one outcome
    pub fn record(&mut self, outcome: &TextOutcome) {
        self.texts += 1;
        match outcome {
            TextOutcome::Blank(_) => self.blank += 1,
            TextOutcome::Cached(_) => self.cache_hits += 1,
            TextOutcome::Translated(_) => self.translated += 1,
            TextOutcome::Fallback { .. } => self.fallbacks += 1,
        }
    }

    /// Fold another batch's counters into this one
    pub fn merge(&mut self, other: &BatchStats) {
        self.texts += other.texts;
        self.unique_texts += other.unique_texts;
        self.cache_hits += other.cache_hits;
        self.translated += other.translated;
        self.fallbacks += other.fallbacks;
        self.blank += other.blank;
    }
}

/// Batch translator with request coalescing
#[derive(Clone)]
pub struct BatchTranslator {
    /// The translator to use
    translator: TextTranslator,

    /// Texts translated concurrently per batch
    batch_size: usize,
}

impl BatchTranslator {
    /// Create a new batch translator; a zero batch size is treated as 1
    pub fn new(translator: TextTranslator, batch_size: usize) -> Self {
        Self {
            translator,
            batch_size: batch_size.max(1),
        }
    }

    /// Texts translated concurrently per batch
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The underlying single-text translator
    pub fn translator(&self) -> &TextTranslator {
        &self.translator
    }

    /// Translate one batch, returning one outcome per input in input order
    ///
    /// Identical texts share a single request. A failing text falls back to
    /// itself without affecting the others.
    pub async fn translate_batch(&self, texts: &[String], target_language: &str) -> (Vec<TextOutcome>, BatchStats) {
        let start_time = Instant::now();

        let mut unique: Vec<&str> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for text in texts {
            let text = text.as_str();
            if !slots.contains_key(text) {
                slots.insert(text, unique.len());
                unique.push(text);
            }
        }

        let results = join_all(
            unique.iter().map(|text| self.translator.translate(text, target_language)),
        ).await;

        let mut stats = BatchStats {
            unique_texts: unique.iter().filter(|t| !t.trim().is_empty()).count(),
            ..BatchStats::default()
        };

        let outcomes: Vec<TextOutcome> = texts
            .iter()
            .map(|text| results[slots[text.as_str()]].clone())
            .collect();

        for outcome in &outcomes {
            stats.record(outcome);
        }

        debug!("Batch of {} texts ({} unique) settled in {:?}",
               texts.len(), unique.len(), start_time.elapsed());

        (outcomes, stats)
    }

    /// Translate any number of texts, one batch after another
    pub async fn translate_all(&self, texts: &[String], target_language: &str) -> (Vec<TextOutcome>, BatchStats) {
        let mut outcomes = Vec::with_capacity(texts.len());
        let mut stats = BatchStats::default();

        for chunk in texts.chunks(self.batch_size) {
            let (chunk_outcomes, chunk_stats) = self.translate_batch(chunk, target_language).await;
            outcomes.extend(chunk_outcomes);
            stats.merge(&chunk_stats);
        }

        (outcomes, stats)
    }
}
