//! Key-value storage for state snapshots.
//!
//! Each store keeps its whole state as one JSON document under a fixed key.
//! Backends only move strings around; encoding lives in [`read_snapshot`]
//! and [`write_snapshot`].

use nile_common::{StorageError, StorageResult};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension used by [`FileStorage`].
const SNAPSHOT_EXTENSION: &str = "json";

/// Trait for storage backends.
pub trait StorageBackend: Send + Sync {
    /// Backend name.
    fn name(&self) -> &str;

    /// Reads the value stored under `key`.
    ///
    /// Returns [`StorageError::NotFound`] when nothing has been written yet.
    fn read(&self, key: &str) -> StorageResult<String>;

    /// Replaces the value stored under `key`.
    fn write(&self, key: &str, data: &str) -> StorageResult<()>;

    /// Removes the value stored under `key`.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Checks if a value exists.
    fn exists(&self, key: &str) -> bool {
        self.read(key).is_ok()
    }
}

/// Reads and decodes the snapshot stored under `key`.
pub fn read_snapshot<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> StorageResult<T> {
    let raw = backend.read(key)?;
    serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Encodes `value` and writes it under `key`.
pub fn write_snapshot<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    backend.write(key, &raw)
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "Memory Storage"
    }

    fn read(&self, key: &str) -> StorageResult<String> {
        self.entries
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, data: &str) -> StorageResult<()> {
        self.entries.lock().insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Creates a new file storage backend rooted at `base_path`.
    #[must_use]
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Gets the full path for a key.
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.{SNAPSHOT_EXTENSION}"))
    }
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &str {
        "File Storage"
    }

    fn read(&self, key: &str) -> StorageResult<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let data = fs::read_to_string(&path)?;
        debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }

    fn write(&self, key: &str, data: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path)?;

        let path = self.key_path(key);
        fs::write(&path, data)?;

        debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.key_path(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        fs::remove_file(&path)?;
        debug!("Deleted {}", path.display());
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.key_path(key).is_file()
    }
}

/// Backend whose every operation fails, for exercising fallback paths.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct BrokenStorage;

#[cfg(test)]
impl StorageBackend for BrokenStorage {
    fn name(&self) -> &str {
        "Broken Storage"
    }

    fn read(&self, _key: &str) -> StorageResult<String> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn write(&self, _key: &str, _data: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
}
