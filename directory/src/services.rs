//! Wiring of the user directory services from settings.
//!
//! Storage capability detection happens here, once: each tier that opens
//! is registered with the durable store in preference order and tiers that
//! fail to open are skipped with a warning.

use std::sync::Arc;

use pagination::PageSize;
use tracing::{info, warn};

use crate::config::{DirectorySettings, SettingsError};
use crate::domain::ports::{UserDirectorySource, UserStore};
use crate::domain::{DashboardState, DirectoryCache, DurableStore, SessionRelay, UserDetailsLoader};
use crate::outbound::key_value::{CapDirKeyValueStore, InMemoryKeyValueStore, KeyValueUserStore};
use crate::outbound::remote::HttpUserDirectorySource;
use crate::outbound::sqlite::SqliteUserStore;

/// Services shared by the dashboard and details views of one session.
#[derive(Clone)]
pub struct DirectoryServices {
    cache: Arc<DirectoryCache>,
    store: Arc<DurableStore>,
    relay: Arc<SessionRelay>,
    page_size: PageSize,
}

impl DirectoryServices {
    /// Build services backed by the HTTP source and the storage tiers named
    /// in `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the endpoint is invalid or the HTTP
    /// client cannot be built. Storage tiers that fail to open never cause
    /// an error.
    pub async fn from_settings(settings: &DirectorySettings) -> Result<Self, SettingsError> {
        let source = HttpUserDirectorySource::new(settings.endpoint()?)?;
        let store = open_durable_store(settings).await;
        Ok(Self::new(Arc::new(source), Arc::new(store), settings.page_size()))
    }

    /// Assemble services from prepared parts.
    pub fn new(
        source: Arc<dyn UserDirectorySource>,
        store: Arc<DurableStore>,
        page_size: PageSize,
    ) -> Self {
        Self {
            cache: Arc::new(DirectoryCache::new(source, Arc::clone(&store))),
            store,
            relay: Arc::new(SessionRelay::new()),
            page_size,
        }
    }

    /// Directory cache of this session.
    pub fn cache(&self) -> &Arc<DirectoryCache> {
        &self.cache
    }

    /// Durable store shared by the cache and the details loader.
    pub fn store(&self) -> &Arc<DurableStore> {
        &self.store
    }

    /// Session relay shared by the dashboard and the details loader.
    pub fn relay(&self) -> &Arc<SessionRelay> {
        &self.relay
    }

    /// Fresh table state sharing this session's relay.
    pub fn dashboard(&self) -> DashboardState {
        DashboardState::new(Arc::clone(&self.relay), self.page_size)
    }

    /// Loader for the details view.
    pub fn details(&self) -> UserDetailsLoader {
        UserDetailsLoader::new(Arc::clone(&self.relay), Arc::clone(&self.store))
    }
}

/// Probe the storage tiers named in `settings` and assemble the durable
/// store from those that open.
pub async fn open_durable_store(settings: &DirectorySettings) -> DurableStore {
    let mut tiers: Vec<Arc<dyn UserStore>> = Vec::with_capacity(2);

    let primary = if settings.in_memory {
        SqliteUserStore::open_in_memory().await
    } else {
        SqliteUserStore::open(&settings.database_path()).await
    };
    match primary {
        Ok(store) => tiers.push(Arc::new(store)),
        Err(error) => warn!(%error, "sqlite tier unavailable; skipping"),
    }

    if settings.in_memory {
        tiers.push(Arc::new(KeyValueUserStore::new(InMemoryKeyValueStore::new())));
    } else {
        match CapDirKeyValueStore::open(settings.key_value_dir()) {
            Ok(entries) => tiers.push(Arc::new(KeyValueUserStore::new(entries))),
            Err(error) => warn!(%error, "key-value tier unavailable; skipping"),
        }
    }

    let store = DurableStore::new(tiers);
    info!(
        backend = store.active_backend().unwrap_or("none"),
        "durable store assembled"
    );
    store
}
