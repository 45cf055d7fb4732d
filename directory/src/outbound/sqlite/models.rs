//! Internal Diesel row structs for the SQLite user store.
//!
//! These types never leave the adapter.

use diesel::prelude::*;

use super::schema::users;

/// Row struct for reading stored records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: String,
    pub payload: String,
}

/// Insertable struct for writing one record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    pub id: String,
    pub position: i32,
    pub payload: String,
}
