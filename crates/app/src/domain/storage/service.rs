//! Key-value storage.

use std::sync::Mutex;

use mockall::automock;
use rustc_hash::FxHashMap;

use crate::domain::storage::errors::StorageError;

/// Volatile storage, lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl InMemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|poisoned| StorageError::Poisoned(poisoned.to_string()))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|poisoned| StorageError::Poisoned(poisoned.to_string()))?;

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// String key-value store the cart is persisted into.
#[automock]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value. Synchronous.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
