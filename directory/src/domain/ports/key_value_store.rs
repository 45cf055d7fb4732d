//! Driven port for a flat string key-value store.
//!
//! Keys and values are opaque strings, like browser local storage. The
//! key-value user store tier layers prefixed record keys on top of it.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by a key-value backend.
    pub enum KeyValueStoreError {
        /// The backend rejected or failed an operation.
        Backend { message: String } => "key-value store failure: {message}",
    }
}

/// Synchronous string key-value store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Remove `key`; removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), KeyValueStoreError>;

    /// Enumerate every stored key.
    fn keys(&self) -> Result<Vec<String>, KeyValueStoreError>;
}
