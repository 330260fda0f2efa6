//! Key-value persistence for job timers

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StorageError;

/// String-keyed persistence surface (get/set/remove)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Access {
    #[default]
    ReadWrite,
    /// Reads succeed, writes fail (full quota, read-only file)
    ReadOnly,
    /// Every call fails (blocked storage)
    Unavailable,
}

/// In-process store. `unavailable()` builds one that rejects every call,
/// `read_only()` one that can be read but not written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    access: Access,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            entries: Mutex::default(),
            access: Access::Unavailable,
        }
    }

    pub fn read_only() -> Self {
        Self {
            entries: Mutex::default(),
            access: Access::ReadOnly,
        }
    }

    /// Seed an entry regardless of access mode
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_read(&self) -> Result<(), StorageError> {
        match self.access {
            Access::Unavailable => Err(StorageError::Io(std::io::Error::other(
                "storage unavailable",
            ))),
            _ => Ok(()),
        }
    }

    fn check_write(&self) -> Result<(), StorageError> {
        match self.access {
            Access::ReadWrite => Ok(()),
            Access::ReadOnly => Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            ))),
            Access::Unavailable => self.check_read(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_read()?;
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_write()?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_write()?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// JSON object on disk, one string value per key
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `timers.json` in the platform data directory
    pub fn open_default() -> Result<Self, StorageError> {
        let dirs = directories::ProjectDirs::from("com", "detailstudio", "detail-studio")
            .ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("timers.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("detail-studio-store-{}", uuid::Uuid::new_v4()))
            .join("timers.json")
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_unavailable_store_errors() {
        let store = MemoryStore::unavailable();
        assert!(store.get("a").is_err());
        assert!(store.set("a", "1").is_err());
        assert!(store.remove("a").is_err());
    }

    #[test]
    fn test_read_only_store_rejects_writes() {
        let store = MemoryStore::read_only().with_entry("a", "1");
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert!(store.set("a", "2").is_err());
        assert!(store.remove("a").is_err());
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = temp_path();
        let store = FileStore::new(&path);
        assert_eq!(store.get("job-timer:1").unwrap(), None);
        store.set("job-timer:1", "{\"elapsed\":3}").unwrap();
        store.set("job-timer:2", "{\"elapsed\":4}").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("job-timer:1").unwrap().as_deref(),
            Some("{\"elapsed\":3}")
        );
        reopened.remove("job-timer:1").unwrap();
        assert_eq!(store.get("job-timer:1").unwrap(), None);
        assert!(store.get("job-timer:2").unwrap().is_some());

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("x"), Err(StorageError::Json(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
