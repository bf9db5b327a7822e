/*!
 * Durable key/value storage for the translation session.
 *
 * The session persists exactly two slots: the serialized translation cache
 * and the preferred language code. `FileStore` keeps one file per slot in a
 * directory; `MemoryStore` keeps them in memory for tests and embedding.
 */

use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::StorageError;

/// Slot holding the serialized translation cache
pub const CACHE_SLOT: &str = "translationCache";

/// Slot holding the preferred language code
pub const LANGUAGE_SLOT: &str = "language";

/// Synchronous string key/value store
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read a slot, `None` if it was never written
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot
    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot; removing a missing slot is not an error
    fn remove(&self, slot: &str) -> Result<(), StorageError>;
}

/// In-memory store with an optional size limit
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store without a quota
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects values larger than `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Create a store pre-filled with raw slot values
    pub fn with_slots<I, K, V>(slots: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            slots: Mutex::new(slots.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
            quota_bytes: None,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.lock().get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded(slot.to_string()));
            }
        }

        self.slots.lock().insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        self.slots.lock().remove(slot);
        Ok(())
    }
}

/// Directory-backed store, one `<slot>.json` file per slot
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            slot: dir.display().to_string(),
            source,
        })?;

        Ok(Self { dir })
    }

    /// Directory the slots live in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            slot: slot.to_string(),
            source,
        };

        // Write next to the target and rename so readers never see a torn file
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;
        tmp.persist(self.slot_path(slot))
            .map_err(|e| io_err(e.error))?;

        debug!("Persisted slot '{}' ({} bytes)", slot, value.len());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                slot: slot.to_string(),
                source,
            }),
        }
    }
}
