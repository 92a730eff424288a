//! Local key/value storage backing preferences and the weather cache.

use parking_lot::Mutex;
use skycard_core::StorageError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const STORAGE_FILE: &str = "storage.json";

/// String key/value store with browser-localStorage semantics.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a single JSON object in `<dir>/storage.json`.
///
/// Every write rewrites the whole file. With a quota set, a write that would
/// grow the serialized store past it fails and leaves the store unchanged.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes: Option<usize>,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(dir).map_err(|e| {
            StorageError::Unavailable(format!("{}: {}", dir.display(), e))
        })?;

        let path = dir.join(STORAGE_FILE);
        let entries = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Discarding unreadable storage file {:?}: {}", path, e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!("Opened storage at {:?} with {} keys", path, entries.len());
        Ok(Self {
            path,
            quota_bytes: None,
            entries: Mutex::new(entries),
        })
    }

    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string(entries)?;
        if let Some(quota) = self.quota_bytes {
            if json.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    used: json.len(),
                    quota,
                });
            }
        }
        std::fs::write(&self.path, json).map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&entries) {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
