//! SQLite-backed primary tier of the durable store.
//!
//! Uses Diesel with `diesel-async`'s synchronous connection wrapper; every
//! `write_all` replaces the table inside one transaction.

mod diesel_user_store;
mod models;
mod schema;

pub use diesel_user_store::SqliteUserStore;
