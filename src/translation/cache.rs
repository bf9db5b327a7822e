/*!
 * Translation caching functionality.
 *
 * This module provides a write-through cache for translations keyed by
 * (source text, target language). The in-memory map is authoritative; every
 * write is mirrored to the durable `translationCache` slot as a list of
 * `[key, value]` pairs so the next session starts warm.
 */

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::storage::{KeyValueStore, CACHE_SLOT};

/// Cache key combining source text and target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Source text to translate
    source_text: String,

    /// Target language code
    target_language: String,
}

impl CacheKey {
    /// Create a new cache key
    fn new(source_text: &str, target_language: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// Flat `{text}_{lang}` form used in durable storage
    fn to_storage_key(&self) -> String {
        format!("{}_{}", self.source_text, self.target_language)
    }

    /// Language codes never contain `_`, so the last one separates the parts
    fn from_storage_key(key: &str) -> Option<Self> {
        let (text, lang) = key.rsplit_once('_')?;
        if lang.is_empty() {
            return None;
        }
        Some(Self::new(text, lang))
    }
}

/// A cached translation with the moment it was stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedTranslation {
    /// Translated text
    text: String,

    /// Unix epoch milliseconds
    stored_at: i64,
}

/// Durable representation: `[[key, value], ...]`
type PersistedEntries = Vec<(String, CachedTranslation)>;

/// Translation cache for storing and retrieving translations
pub struct TranslationCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, CachedTranslation>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,

    /// Durable mirror
    store: Arc<dyn KeyValueStore>,

    /// Entry lifetime in milliseconds, `None` keeps entries forever
    ttl_ms: Option<i64>,
}

impl TranslationCache {
    /// Load the cache from durable storage
    ///
    /// A missing slot, an unreadable slot, or a payload that fails to
    /// deserialize all yield an empty cache. Entries already past their TTL
    /// are dropped.
    pub fn load(store: Arc<dyn KeyValueStore>, ttl_ms: u64) -> Self {
        Self::load_at(store, ttl_ms, now_ms())
    }

    pub(crate) fn load_at(store: Arc<dyn KeyValueStore>, ttl_ms: u64, now: i64) -> Self {
        let ttl_ms = (ttl_ms > 0).then(|| i64::try_from(ttl_ms).unwrap_or(i64::MAX));

        let entries = match store.get(CACHE_SLOT) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedEntries>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding unreadable translation cache: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read translation cache: {}", e);
                Vec::new()
            }
        };

        let total = entries.len();
        let map: HashMap<CacheKey, CachedTranslation> = entries
            .into_iter()
            .filter_map(|(key, value)| CacheKey::from_storage_key(&key).map(|k| (k, value)))
            .filter(|(_, value)| !is_expired(ttl_ms, value, now))
            .collect();

        debug!("Loaded {} of {} cached translations", map.len(), total);

        Self {
            cache: Arc::new(RwLock::new(map)),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            store,
            ttl_ms,
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, source_text: &str, target_language: &str) -> Option<String> {
        self.get_at(source_text, target_language, now_ms())
    }

    pub(crate) fn get_at(&self, source_text: &str, target_language: &str, now: i64) -> Option<String> {
        let key = CacheKey::new(source_text, target_language);
        let cache = self.cache.read();

        match cache.get(&key).filter(|entry| !is_expired(self.ttl_ms, entry, now)) {
            Some(entry) => {
                *self.hits.write() += 1;

                debug!("Cache hit for '{}' (-> {})",
                       truncate_text(source_text, 30),
                       target_language);

                Some(entry.text.clone())
            },
            None => {
                *self.misses.write() += 1;

                debug!("Cache miss for '{}' (-> {})",
                       truncate_text(source_text, 30),
                       target_language);

                None
            }
        }
    }

    /// Store a translation and mirror the cache to durable storage
    ///
    /// Writing the same key twice keeps the last value. A failed save is
    /// logged; the in-memory entry stays.
    pub fn store(&self, source_text: &str, target_language: &str, translation: &str) {
        self.store_at(source_text, target_language, translation, now_ms());
    }

    pub(crate) fn store_at(&self, source_text: &str, target_language: &str, translation: &str, now: i64) {
        let key = CacheKey::new(source_text, target_language);
        self.cache.write().insert(key, CachedTranslation {
            text: translation.to_string(),
            stored_at: now,
        });

        debug!("Cached translation for '{}' (-> {})",
               truncate_text(source_text, 30),
               target_language);

        if let Err(e) = self.persist() {
            warn!("Failed to persist translation cache: {}", e);
        }
    }

    /// Serialize the whole map into the durable slot
    pub fn persist(&self) -> Result<(), StorageError> {
        let entries: PersistedEntries = self.cache.read()
            .iter()
            .map(|(key, value)| (key.to_storage_key(), value.clone()))
            .collect();

        let raw = serde_json::to_string(&entries)?;
        self.store.set(CACHE_SLOT, &raw)
    }

    /// Get cache statistics
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache, including its durable mirror
    pub fn clear(&self) -> Result<(), StorageError> {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("Translation cache cleared");
        self.store.remove(CACHE_SLOT)
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Entry lifetime in milliseconds, if entries expire
    pub fn ttl_ms(&self) -> Option<i64> {
        self.ttl_ms
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            store: self.store.clone(),
            ttl_ms: self.ttl_ms,
        }
    }
}

fn is_expired(ttl_ms: Option<i64>, entry: &CachedTranslation, now: i64) -> bool {
    ttl_ms.is_some_and(|ttl| now.saturating_sub(entry.stored_at) >= ttl)
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}
