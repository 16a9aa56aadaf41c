use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store is read-only")]
    ReadOnly,
}

/// String-valued key/value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. On error the previous on-disk state is
    /// left intact.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, used by tests and when no file is wanted
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, like a browser store over quota
    pub fn read_only() -> Self {
        Self {
            values: BTreeMap::new(),
            read_only: true,
        }
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk holding string values.
///
/// Every `set` rewrites the whole file through a sibling temp file and a
/// rename, so a crash mid-write never leaves a truncated store behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or unreadable file opens empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::read_values(&path);
        Self { path, values }
    }

    fn read_values(path: &Path) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "no store file yet, starting empty");
                return BTreeMap::new();
            }
            Err(err) => {
                warn!(?path, %err, "failed to read store file, starting empty");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(s) => Some((key, s)),
                    _ => None,
                })
                .collect(),
            Ok(_) => {
                warn!(?path, "store file is not a JSON object, starting empty");
                BTreeMap::new()
            }
            Err(err) => {
                warn!(?path, %err, "store file is corrupt, starting empty");
                BTreeMap::new()
            }
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        let result = self.persist();
        if result.is_err() {
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("skin"), None);

        store.set("skin", "neon").unwrap();
        assert_eq!(store.get("skin").as_deref(), Some("neon"));
    }

    #[test]
    fn test_read_only_memory_store_rejects_writes() {
        let mut store = MemoryStore::read_only();
        assert!(matches!(store.set("skin", "neon"), Err(StoreError::ReadOnly)));
        assert_eq!(store.get("skin"), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = FileStore::open(&path);
        store.set("skin", "lava").unwrap();
        store.set("scores", "[]").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("skin").as_deref(), Some("lava"));
        assert_eq!(reopened.get("scores").as_deref(), Some("[]"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get("scores"), None);
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        fs::write(&path, "{not json").unwrap();
        assert_eq!(FileStore::open(&path).get("skin"), None);

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert_eq!(FileStore::open(&path).get("skin"), None);
    }

    #[test]
    fn test_non_string_values_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"skin": "ice", "scores": 42}"#).unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("skin").as_deref(), Some("ice"));
        assert_eq!(store.get("scores"), None);
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        // a directory where the file should be makes the rename fail
        let path = dir.path().join("store.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut store = FileStore::open(&path);
        assert!(store.set("skin", "zebra").is_err());
        assert_eq!(store.get("skin"), None);
    }
}
