//! Local-first user directory for the loan dashboard.
//!
//! The crate keeps a durable on-device copy of the remote user directory,
//! reconciles it with the remote source on each session start and serves
//! filtered, paginated views over the in-memory snapshot.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod services;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{DirectorySettings, SettingsError};
pub use services::DirectoryServices;
