use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::MarketDataError;

use super::store::PriceCacheStore;

/// JSON-file backed store.
///
/// The file holds a single JSON object of key → string value. Every `set`
/// rewrites the whole file under a process-wide lock.
#[derive(Debug)]
pub struct FilePriceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePriceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load_locked(&self) -> Result<HashMap<String, String>, MarketDataError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let raw = fs::read(&self.path).map_err(|e| {
            MarketDataError::Cache(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        if raw.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(serde_json::from_slice(&raw)?)
    }

    fn persist_locked(&self, entries: &HashMap<String, String>) -> Result<(), MarketDataError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MarketDataError::Cache(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|e| {
            MarketDataError::Cache(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl PriceCacheStore for FilePriceStore {
    fn get(&self, key: &str) -> Result<Option<String>, MarketDataError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| MarketDataError::Cache("Price store lock poisoned".into()))?;
        Ok(self.load_locked()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MarketDataError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| MarketDataError::Cache("Price store lock poisoned".into()))?;
        let mut entries = self.load_locked()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist_locked(&entries)
    }
}
