//! Key/value storage persisted as one JSON file
//!
//! The browser clients kept their sessions in `localStorage`; this is the
//! same flat string map, stored at `{dir}/storage.json`. Every access reads
//! the file again, so two stores over the same directory always agree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::SessionError;

const STORAGE_FILE: &str = "storage.json";

/// Serializes read-modify-write cycles across every store in the process
static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// `localStorage`-like string map on disk
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Storage file inside `dir`; nothing is created until the first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(STORAGE_FILE),
        }
    }

    /// Read one key. A missing or unreadable file reads as empty.
    pub fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    /// Write several keys in one file update
    pub fn set_many(&self, entries: &[(&str, String)]) -> Result<(), SessionError> {
        let _guard = WRITE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_all();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        self.write_all(&map)
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<(), SessionError> {
        self.set_many(&[(key, value.into())])
    }

    /// Remove keys; removing absent keys is not an error
    pub fn remove(&self, keys: &[&str]) -> Result<(), SessionError> {
        let _guard = WRITE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_all();
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() == before {
            return Ok(());
        }
        self.write_all(&map)
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&json) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Storage file is corrupt, treating as empty");
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, map: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));

        assert!(storage.get("auth_token").is_none());
        storage.set("auth_token", "abc").unwrap();
        storage.set("other", "x").unwrap();
        assert_eq!(storage.get("auth_token").as_deref(), Some("abc"));

        storage.remove(&["auth_token", "missing"]).unwrap();
        assert!(storage.get("auth_token").is_none());
        assert_eq!(storage.get("other").as_deref(), Some("x"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        fs::write(storage.path(), "{not json").unwrap();

        assert!(storage.get("auth_token").is_none());
        storage.set("auth_token", "fresh").unwrap();
        assert_eq!(storage.get("auth_token").as_deref(), Some("fresh"));
    }
}
