use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;

/// Error type for key-value storage
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {key}: {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },
    #[error("could not write {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },
    #[error("could not serialize {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

/// Text key-value storage holding one payload per key.
pub trait KeyValueStore {
    /// Current payload for `key`, or None if nothing was ever stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replace the payload for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Directory backing the store, if any. Used to place the recovery log.
    fn dir(&self) -> Option<&Path> {
        None
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn dir(&self) -> Option<&Path> {
        (**self).dir()
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Self {
        FileStore {
            dir: dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        atomic_write(&self.path_for(key), value.as_bytes()).map_err(|e| StoreError::Write {
            key: key.to_string(),
            source: e,
        })
    }

    fn dir(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}

/// In-memory store for tests. Counts writes per key and can be told to
/// fail every write, or only writes to some keys.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: HashMap<String, usize>,
    failing: HashSet<String>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed a payload without counting it as a write
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every write to `key` fail until `recover` is called
    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn recover(&mut self, key: &str) {
        self.failing.remove(key);
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn write_count(&self, key: &str) -> usize {
        self.writes.get(key).copied().unwrap_or(0)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes || self.failing.contains(key) {
            return Err(StoreError::Write {
                key: key.to_string(),
                source: std::io::Error::other("storage quota exceeded"),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        *self.writes.entry(key.to_string()).or_default() += 1;
        Ok(())
    }
}
