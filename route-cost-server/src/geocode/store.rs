//! Local key-value stores for persisted cache blobs.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::error::StoreError;

/// A string-keyed store of serialized blobs.
///
/// Writes replace the whole value. There is no locking across read-modify-write
/// cycles: two writers racing on one key means the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing has been written.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed store: each key is a `{key}.json` file in one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`.
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Create the directory if needed
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
        }

        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }
}

/// In-memory store, for tests and runs that should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_store_write_then_read() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("geocode_cache", "{\"a\":1}").unwrap();
        assert_eq!(
            store.read("geocode_cache").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.path().join("geocode_cache.json").exists());
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.read("nothing").unwrap().is_none());
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("cache");
        let store = FileStore::new(&nested);

        store.write("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn file_store_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write("k", "first").unwrap();
        store.write("k", "second").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.read("k").unwrap().is_none());

        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
    }
}
