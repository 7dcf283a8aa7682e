use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

use super::{DurableStorage, StorageKey};

/// In-process storage; contents are lost when the value is dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<StorageKey, String>>> {
        self.entries
            .lock()
            .map_err(|e| AppError::Storage(format!("Storage lock poisoned: {}", e)))
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        Ok(self.entries()?.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        self.entries()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> AppResult<()> {
        self.entries()?.remove(&key);
        Ok(())
    }
}
