use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::paths::get_preferences_path;

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("corrupt preferences file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

// ── Trait ────────────────────────────────────────────────────────────────────

/// A durable string-to-string store that survives restarts.
///
/// Implementations report failures instead of swallowing them; deciding
/// whether a failure is fatal is the caller's business.
pub trait PreferenceStorage: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ── JSON file ────────────────────────────────────────────────────────────────

/// Flat `{ "key": "value" }` object persisted at a single path.
///
/// Entries are read one key at a time: a number is handed back in its
/// decimal form, any other non-string value reads as absent for that key
/// alone. Entries this store never wrote are carried over untouched on
/// every write.
///
/// Every call goes to disk so that edits made by another process (or a
/// user deleting the file) are picked up on the next read.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage backed by `preferences.json` in the application data dir.
    pub fn open_default() -> Result<Self, StorageError> {
        let path = get_preferences_path().map_err(StorageError::Unavailable)?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn write_map(&self, map: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let raw = serde_json::to_string_pretty(map)?;

        // Write to a uniquely named sibling first, then rename over the target.
        let temp_path = self
            .path
            .with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&temp_path, raw).map_err(|source| StorageError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            StorageError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = match self.read_map()?.remove(key) {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => {
                log::debug!("Ignoring non-string preference '{key}': {other}");
                None
            }
            None => None,
        };
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Corrupt { path, reason }) => {
                log::warn!(
                    "Replacing corrupt preferences file {}: {reason}",
                    path.display()
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)?;
        log::trace!("Saved preference '{key}' to {:?}", self.path);
        Ok(())
    }
}

// ── In-memory ────────────────────────────────────────────────────────────────

/// Process-local storage. Clones share the same map, so a test (or a
/// headless embedder) can keep a handle and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    /// Read an entry without going through the trait.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    /// Drop every stored entry, e.g. to simulate the user wiping storage.
    pub fn clear(&self) {
        if let Ok(mut map) = self.entries.lock() {
            map.clear();
        }
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
