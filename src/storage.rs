//! Key/value preference storage (`localStorage` / `sessionStorage`).

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Mutex,
    PoisonError,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access storage file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not a JSON object of strings: {0}")]
    Format(#[from] serde_json::Error),
}

/// String key/value store. Every write is a single key, last write wins.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// The value could not be persisted
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage that lives as long as the process; used for session-scoped values.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    /// Stored key/value pairs
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated storage.
    #[must_use]
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = values.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self { values: Mutex::new(values) }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable storage backed by a JSON object file, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStorage {
    /// Backing JSON file
    path: PathBuf,
    /// Mirror of the file contents, rewritten on every `set`
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the file, starting empty when it does not exist yet.
    ///
    /// # Errors
    /// The file exists but cannot be read or is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!("Storage file not found, starting empty: {:?}", path);
            BTreeMap::new()
        };
        Ok(Self { path, values: Mutex::new(values) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&*values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
