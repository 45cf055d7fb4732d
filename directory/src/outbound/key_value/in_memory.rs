//! Process-local key-value store.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Key-value store backed by an in-process ordered map.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.entries().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, KeyValueStoreError> {
        Ok(self.entries().keys().cloned().collect())
    }
}
