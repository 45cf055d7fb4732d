//! Driven port for fetching the full user directory from its remote source.
//!
//! The adapter performs one request per call. Retry and fallback policy
//! belongs to the directory cache, not to implementations of this port.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::UserRecord;

define_port_error! {
    /// Errors surfaced while fetching the remote directory.
    pub enum UserDirectorySourceError {
        /// The transport failed before a response arrived.
        RemoteUnavailable { message: String } =>
            "user directory unavailable: {message}",
        /// The endpoint answered with a non-success status.
        RemoteRejected { status: u16, message: String } =>
            "user directory rejected request with status {status}: {message}",
        /// The payload could not be decoded into user records.
        MalformedResponse { message: String } =>
            "user directory response malformed: {message}",
    }
}

/// Port for reading every user record from the remote directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectorySource: Send + Sync {
    /// Fetch the complete directory in source order.
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, UserDirectorySourceError>;
}
