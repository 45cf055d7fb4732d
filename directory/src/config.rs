//! User directory configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use pagination::PageSize;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Remote endpoint serving the user directory.
pub const DEFAULT_ENDPOINT: &str = "https://api.npoint.io/4bd9188d63a90399d13e";
const DEFAULT_DATABASE_PATH: &str = "user-directory/users.sqlite3";
const DEFAULT_KEY_VALUE_DIR: &str = "user-directory/kv";

/// Errors raised while turning settings into services.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The configured endpoint is not a valid absolute URL.
    #[error("invalid user directory endpoint {value:?}: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration values for the user directory services.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct DirectorySettings {
    /// Remote endpoint override.
    pub endpoint: Option<String>,
    /// SQLite database file for the primary storage tier.
    pub database_path: Option<PathBuf>,
    /// Directory holding the key-value storage tier.
    pub key_value_dir: Option<PathBuf>,
    /// Initial table page size; one of 10, 20, 50 or 100.
    pub page_size: Option<u32>,
    /// Keep both storage tiers in memory instead of on disk.
    #[ortho_config(default = false)]
    pub in_memory: bool,
}

impl DirectorySettings {
    /// Return the configured endpoint, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEndpoint`] when the value does not
    /// parse as a URL.
    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        let value = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        Url::parse(value).map_err(|source| SettingsError::InvalidEndpoint {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the configured database path, falling back to the default.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    /// Return the configured key-value directory, falling back to the
    /// default.
    pub fn key_value_dir(&self) -> PathBuf {
        self.key_value_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_VALUE_DIR))
    }

    /// Return the configured page size.
    ///
    /// Values outside the allowed set fall back to the default with a
    /// warning.
    pub fn page_size(&self) -> PageSize {
        let Some(value) = self.page_size else {
            return PageSize::DEFAULT;
        };
        PageSize::new(value).unwrap_or_else(|error| {
            warn!(%error, fallback = PageSize::DEFAULT.get(), "ignoring configured page size");
            PageSize::DEFAULT
        })
    }
}
