//! Diesel table definitions for the SQLite user store.
//!
//! These definitions must match [`CREATE_USERS_TABLE`] exactly.

/// DDL applied when a store is opened.
pub(crate) const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    position INTEGER NOT NULL,
    payload TEXT NOT NULL
)";

diesel::table! {
    /// One row per user record, keyed by identifier.
    users (id) {
        /// Record identifier.
        id -> Text,
        /// Index of the record in the last written directory.
        position -> Integer,
        /// Full record as camelCase JSON.
        payload -> Text,
    }
}
