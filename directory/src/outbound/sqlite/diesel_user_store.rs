//! SQLite `UserStore` implementation using Diesel ORM.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{UserId, UserRecord};

use super::models::{NewUserRow, UserRow};
use super::schema::{CREATE_USERS_TABLE, users};

type SqliteAsyncConnection = SyncConnectionWrapper<SqliteConnection>;

const IN_MEMORY_DATABASE: &str = ":memory:";

/// Diesel-backed implementation of the `UserStore` port.
///
/// Holds one connection; SQLite serialises writers anyway and an in-memory
/// database lives only as long as its connection.
#[derive(Clone)]
pub struct SqliteUserStore {
    connection: Arc<Mutex<SqliteAsyncConnection>>,
}

impl SqliteUserStore {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::Unavailable`] when the parent directory
    /// cannot be created, the database cannot be opened or the schema
    /// cannot be applied.
    pub async fn open(path: &Path) -> Result<Self, UserStoreError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|error| {
                UserStoreError::unavailable(format!(
                    "create database directory {}: {error}",
                    parent.display()
                ))
            })?;
        }
        let url = path.to_str().ok_or_else(|| {
            UserStoreError::unavailable(format!(
                "database path is not valid UTF-8: {}",
                path.display()
            ))
        })?;
        Self::establish(url).await
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::Unavailable`] when SQLite cannot be opened.
    pub async fn open_in_memory() -> Result<Self, UserStoreError> {
        Self::establish(IN_MEMORY_DATABASE).await
    }

    async fn establish(url: &str) -> Result<Self, UserStoreError> {
        let mut connection = SqliteAsyncConnection::establish(url).await.map_err(|error| {
            UserStoreError::unavailable(format!("open sqlite database {url}: {error}"))
        })?;
        diesel::sql_query(CREATE_USERS_TABLE)
            .execute(&mut connection)
            .await
            .map_err(map_diesel_error)?;
        debug!(%url, "sqlite user store ready");
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }
}

/// Map Diesel errors to domain user store errors.
fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::unavailable("database connection closed")
        }
        DieselError::DeserializationError(inner) | DieselError::SerializationError(inner) => {
            UserStoreError::serialization(inner.to_string())
        }
        other => UserStoreError::unavailable(other.to_string()),
    }
}

fn row_to_record(row: UserRow) -> Result<UserRecord, UserStoreError> {
    serde_json::from_str(&row.payload).map_err(|error| {
        UserStoreError::serialization(format!("stored user {}: {error}", row.id))
    })
}

fn record_to_row(position: usize, record: &UserRecord) -> Result<NewUserRow, UserStoreError> {
    let position = i32::try_from(position)
        .map_err(|_| UserStoreError::unavailable("directory exceeds sqlite row positions"))?;
    let payload = serde_json::to_string(record).map_err(|error| {
        UserStoreError::serialization(format!("encode user {}: {error}", record.id()))
    })?;
    Ok(NewUserRow {
        id: record.id().as_str().to_owned(),
        position,
        payload,
    })
}

#[async_trait]
impl UserStore for SqliteUserStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn read_all(&self) -> Result<Vec<UserRecord>, UserStoreError> {
        let mut conn = self.connection.lock().await;
        let rows: Vec<UserRow> = users::table
            .order(users::position.asc())
            .select(UserRow::as_select())
            .load(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row_to_record(row)
                    .inspect_err(|error| warn!(%error, "skipping undecodable user row"))
                    .ok()
            })
            .collect())
    }

    async fn write_all(&self, records: &[UserRecord]) -> Result<(), UserStoreError> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(position, record)| record_to_row(position, record))
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.connection.lock().await;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(users::table).execute(conn).await?;
                for row in &rows {
                    diesel::insert_into(users::table)
                        .values(row)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn read_one(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let mut conn = self.connection.lock().await;
        let row: Option<UserRow> = users::table
            .find(id.as_str())
            .select(UserRow::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }
}
