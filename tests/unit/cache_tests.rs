/*!
 * Tests for translation cache functionality
 */

use std::sync::Arc;

use sitelingo::storage::{KeyValueStore, MemoryStore, CACHE_SLOT};
use sitelingo::translation::TranslationCache;

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

fn empty_cache() -> (Arc<MemoryStore>, TranslationCache) {
    let store = Arc::new(MemoryStore::new());
    let cache = TranslationCache::load(store.clone(), DAY_MS);
    (store, cache)
}

#[test]
fn test_cache_store_shouldReturnStoredTranslation() {
    let (_store, cache) = empty_cache();
    cache.store("안녕하세요", "en", "Hello");

    assert_eq!(cache.get("안녕하세요", "en"), Some("Hello".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_get_withMissingKey_shouldReturnNone() {
    let (_store, cache) = empty_cache();
    assert!(cache.get("없음", "en").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_cache_get_withDifferentTarget_shouldReturnNone() {
    let (_store, cache) = empty_cache();
    cache.store("안녕하세요", "en", "Hello");

    assert!(cache.get("안녕하세요", "ja").is_none());
}

#[test]
fn test_cache_store_withSameKey_shouldKeepLastValue() {
    let (_store, cache) = empty_cache();
    cache.store("안녕", "en", "Hi");
    cache.store("안녕", "en", "Hello");

    assert_eq!(cache.get("안녕", "en"), Some("Hello".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_store_shouldWriteThroughToStore() {
    let (store, cache) = empty_cache();
    cache.store("안녕", "en", "Hello");
    cache.store("제품_소개", "ja", "製品紹介");

    let raw = store.get(CACHE_SLOT).unwrap().expect("cache slot should be written");
    assert!(raw.contains("안녕_en"));

    let reloaded = TranslationCache::load(store.clone(), DAY_MS);
    assert_eq!(reloaded.get("안녕", "en"), Some("Hello".to_string()));
    assert_eq!(reloaded.get("제품_소개", "ja"), Some("製品紹介".to_string()));
}

#[test]
fn test_cache_load_withCorruptedSlot_shouldStartEmpty() {
    let store = Arc::new(MemoryStore::with_slots([(CACHE_SLOT, "{definitely not json")]));
    let cache = TranslationCache::load(store, DAY_MS);

    assert!(cache.is_empty());
    cache.store("안녕", "en", "Hello");
    assert_eq!(cache.get("안녕", "en"), Some("Hello".to_string()));
}

#[test]
fn test_cache_load_withExpiredEntry_shouldDropIt() {
    let raw = r#"[["안녕_en",{"text":"Hello","storedAt":0}]]"#;
    let store = Arc::new(MemoryStore::with_slots([(CACHE_SLOT, raw)]));

    let cache = TranslationCache::load(store, DAY_MS);
    assert!(cache.get("안녕", "en").is_none());
}

#[test]
fn test_cache_load_withZeroTtl_shouldKeepOldEntries() {
    let raw = r#"[["안녕_en",{"text":"Hello","storedAt":0}]]"#;
    let store = Arc::new(MemoryStore::with_slots([(CACHE_SLOT, raw)]));

    let cache = TranslationCache::load(store, 0);
    assert!(cache.ttl_ms().is_none());
    assert_eq!(cache.get("안녕", "en"), Some("Hello".to_string()));
}

#[test]
fn test_cache_store_withQuotaExceeded_shouldKeepMemoryEntry() {
    let store = Arc::new(MemoryStore::with_quota(8));
    let cache = TranslationCache::load(store.clone(), DAY_MS);

    cache.store("아주 긴 문장입니다", "en", "This is a very long sentence");

    assert_eq!(cache.get("아주 긴 문장입니다", "en"), Some("This is a very long sentence".to_string()));
    assert_eq!(store.get(CACHE_SLOT).unwrap(), None);
}

#[test]
fn test_cache_clear_shouldEmptyMemoryAndSlot() {
    let (store, cache) = empty_cache();
    cache.store("안녕", "en", "Hello");

    cache.clear().unwrap();

    assert!(cache.is_empty());
    assert_eq!(store.get(CACHE_SLOT).unwrap(), None);
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let (_store, cache) = empty_cache();
    cache.store("안녕", "en", "Hello");

    cache.get("안녕", "en");
    cache.get("안녕", "en");
    cache.get("없음", "en");

    let (hits, misses, hit_rate) = cache.stats();
    assert_eq!(hits, 2);
    assert_eq!(misses, 1);
    assert!((hit_rate - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_cache_clone_shouldShareEntries() {
    let (_store, cache) = empty_cache();
    let clone = cache.clone();

    clone.store("안녕", "en", "Hello");
    assert_eq!(cache.get("안녕", "en"), Some("Hello".to_string()));
}
