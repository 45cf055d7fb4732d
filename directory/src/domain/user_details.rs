//! Resolves the record shown on the user details view.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::{DurableStore, SessionRelay, UserId, UserRecord};

/// Failures shown on the details view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserDetailsError {
    /// The route carried no identifier.
    #[error("User ID not provided")]
    MissingId,
    /// Neither the relay nor the durable store holds the record.
    #[error("User not found")]
    NotFound,
}

/// Loads a record for the details view: relay first, durable store second.
#[derive(Clone)]
pub struct UserDetailsLoader {
    relay: Arc<SessionRelay>,
    store: Arc<DurableStore>,
}

impl UserDetailsLoader {
    /// Loader consulting `relay` before `store`.
    pub fn new(relay: Arc<SessionRelay>, store: Arc<DurableStore>) -> Self {
        Self { relay, store }
    }

    /// Resolve the record named by the route parameter `id`.
    pub async fn load(&self, id: Option<&str>) -> Result<UserRecord, UserDetailsError> {
        let raw = id
            .filter(|value| !value.is_empty())
            .ok_or(UserDetailsError::MissingId)?;
        let id = UserId::new(raw).map_err(|_| UserDetailsError::NotFound)?;

        if let Some(record) = self.relay.take(&id) {
            debug!(%id, "details served from session relay");
            return Ok(record);
        }
        self.store
            .read_one(&id)
            .await
            .ok_or(UserDetailsError::NotFound)
    }
}
