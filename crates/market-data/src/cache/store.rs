use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::MarketDataError;

/// Key-value storage for the persisted price record.
///
/// Mirrors browser local storage: string keys, string (JSON) values,
/// last write wins. Implementations must be safe to share across tasks.
pub trait PriceCacheStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, MarketDataError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), MarketDataError>;
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryPriceStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PriceCacheStore for InMemoryPriceStore {
    fn get(&self, key: &str) -> Result<Option<String>, MarketDataError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| MarketDataError::Cache("Price store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MarketDataError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| MarketDataError::Cache("Price store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
