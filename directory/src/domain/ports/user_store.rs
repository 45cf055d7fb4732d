//! Driven port for one tier of the durable user store.
//!
//! Each tier persists the full directory keyed by user identifier. Tiers
//! report failures; the tiered [`DurableStore`](crate::domain::DurableStore)
//! absorbs them so callers always receive data.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{UserId, UserRecord};

define_port_error! {
    /// Errors surfaced by a storage tier.
    pub enum UserStoreError {
        /// The backend cannot be opened or an operation on it failed.
        Unavailable { message: String } =>
            "user store unavailable: {message}",
        /// A stored entry could not be encoded or decoded.
        Serialization { message: String } =>
            "user store serialisation failed: {message}",
    }
}

/// Port implemented by each persistence backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Read every stored record.
    async fn read_all(&self) -> Result<Vec<UserRecord>, UserStoreError>;

    /// Replace the stored set with `records`; identifiers absent from
    /// `records` are removed.
    async fn write_all(&self, records: &[UserRecord]) -> Result<(), UserStoreError>;

    /// Read one record by identifier.
    async fn read_one(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError>;
}
