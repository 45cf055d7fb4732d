//! Secondary durable-store tier layered on a string key-value store.
//!
//! Each record is stored as camelCase JSON under `user_<id>`, so the tier
//! can be enumerated by prefix scan. Keys without the prefix belong to
//! other callers and are left alone.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, UserStore, UserStoreError};
use crate::domain::{UserId, UserRecord};

/// Prefix marking user record entries.
pub const USER_KEY_PREFIX: &str = "user_";

/// Key under which the record for `id` is stored.
pub fn user_key(id: &UserId) -> String {
    format!("{USER_KEY_PREFIX}{id}")
}

/// `UserStore` tier storing one key-value entry per record.
#[derive(Debug)]
pub struct KeyValueUserStore<K> {
    entries: K,
}

impl<K> KeyValueUserStore<K> {
    /// Store user records in `entries`.
    pub fn new(entries: K) -> Self {
        Self { entries }
    }

    /// Underlying key-value store.
    pub fn entries(&self) -> &K {
        &self.entries
    }
}

fn map_backend_error(error: KeyValueStoreError) -> UserStoreError {
    match error {
        KeyValueStoreError::Backend { message } => UserStoreError::unavailable(message),
    }
}

fn decode(key: &str, raw: &str) -> Result<UserRecord, UserStoreError> {
    serde_json::from_str(raw)
        .map_err(|error| UserStoreError::serialization(format!("entry {key}: {error}")))
}

impl<K: KeyValueStore> KeyValueUserStore<K> {
    fn user_keys(&self) -> Result<Vec<String>, UserStoreError> {
        let keys = self.entries.keys().map_err(map_backend_error)?;
        Ok(keys
            .into_iter()
            .filter(|key| key.starts_with(USER_KEY_PREFIX))
            .collect())
    }
}

#[async_trait]
impl<K: KeyValueStore> UserStore for KeyValueUserStore<K> {
    fn backend_name(&self) -> &'static str {
        "key-value"
    }

    async fn read_all(&self) -> Result<Vec<UserRecord>, UserStoreError> {
        let mut records = Vec::new();
        for key in self.user_keys()? {
            let Some(raw) = self.entries.get_item(&key).map_err(map_backend_error)? else {
                continue;
            };
            match decode(&key, &raw) {
                Ok(record) => records.push(record),
                Err(error) => warn!(%key, %error, "skipping undecodable user entry"),
            }
        }
        Ok(records)
    }

    async fn write_all(&self, records: &[UserRecord]) -> Result<(), UserStoreError> {
        let mut written = HashSet::with_capacity(records.len());
        for record in records {
            let key = user_key(record.id());
            let raw = serde_json::to_string(record).map_err(|error| {
                UserStoreError::serialization(format!("encode user {}: {error}", record.id()))
            })?;
            self.entries
                .set_item(&key, &raw)
                .map_err(map_backend_error)?;
            written.insert(key);
        }

        let stale: Vec<String> = self
            .user_keys()?
            .into_iter()
            .filter(|key| !written.contains(key))
            .collect();
        for key in &stale {
            self.entries.remove_item(key).map_err(map_backend_error)?;
        }
        debug!(
            written = written.len(),
            removed = stale.len(),
            "key-value user entries replaced"
        );
        Ok(())
    }

    async fn read_one(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let key = user_key(id);
        self.entries
            .get_item(&key)
            .map_err(map_backend_error)?
            .map(|raw| decode(&key, &raw))
            .transpose()
    }
}
