//! JSON file implementation of [`KeyValueStore`].
//!
//! The whole map is read on every access and rewritten on every change. The
//! file holds a handful of short strings, so this stays simple. A file that
//! does not parse reads as empty.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod file_store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use session::store::{KeyValueStore, StorageError};

pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Unavailable(format!("{}: {e}", self.path.display()))),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // Unreadable state means signed out; the next write replaces it.
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt state file");
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let write_err = |reason: String| StorageError::Write { key: key.to_owned(), reason };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(|e| write_err(e.to_string()))?;
        fs::write(&self.path, rendered).map_err(|e| write_err(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(key, &entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(key, &entries)
    }
}
