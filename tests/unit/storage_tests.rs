/*!
 * Tests for durable storage slots
 */

use anyhow::Result;
use sitelingo::errors::StorageError;
use sitelingo::storage::{FileStore, KeyValueStore, MemoryStore, CACHE_SLOT, LANGUAGE_SLOT};
use crate::common;

#[test]
fn test_memoryStore_setThenGet_shouldReturnValue() {
    let store = MemoryStore::new();
    assert_eq!(store.get(LANGUAGE_SLOT).unwrap(), None);

    store.set(LANGUAGE_SLOT, "en").unwrap();
    store.set(LANGUAGE_SLOT, "ja").unwrap();

    assert_eq!(store.get(LANGUAGE_SLOT).unwrap(), Some("ja".to_string()));
}

#[test]
fn test_memoryStore_withSlots_shouldPrefill() {
    let store = MemoryStore::with_slots([(LANGUAGE_SLOT, "vi")]);
    assert_eq!(store.get(LANGUAGE_SLOT).unwrap(), Some("vi".to_string()));
    assert_eq!(store.get(CACHE_SLOT).unwrap(), None);
}

#[test]
fn test_memoryStore_withQuota_shouldRejectLargeValue() {
    let store = MemoryStore::with_quota(2);

    let result = store.set(CACHE_SLOT, "[[\"a_en\"]]");
    assert!(matches!(result, Err(StorageError::QuotaExceeded(slot)) if slot == CACHE_SLOT));
}

#[test]
fn test_fileStore_shouldPersistAcrossInstances() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let store = FileStore::open(temp_dir.path())?;
    store.set(LANGUAGE_SLOT, "th")?;
    assert!(temp_dir.path().join("language.json").exists());

    let reopened = FileStore::open(temp_dir.path())?;
    assert_eq!(reopened.get(LANGUAGE_SLOT)?, Some("th".to_string()));
    Ok(())
}

#[test]
fn test_fileStore_remove_withMissingSlot_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store = FileStore::open(temp_dir.path())?;

    store.remove(CACHE_SLOT)?;
    assert_eq!(store.get(CACHE_SLOT)?, None);
    Ok(())
}

#[test]
fn test_fileStore_open_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().join("a").join("b");

    let store = FileStore::open(&dir)?;

    assert!(dir.is_dir());
    assert_eq!(store.dir(), dir.as_path());
    Ok(())
}
