//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **remote**: reqwest-backed source for the remote user directory
//! - **sqlite**: Diesel/SQLite primary tier of the durable store
//! - **key_value**: key-value backends and the secondary durable-store tier
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod key_value;
pub mod remote;
pub mod sqlite;
