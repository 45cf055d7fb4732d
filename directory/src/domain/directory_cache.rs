//! Directory cache orchestrator.
//!
//! Each session start runs one reconciliation: the durable store is read
//! and published immediately while the remote fetch is in flight, then the
//! fetch outcome either replaces the snapshot (persisting it first) or
//! degrades to the cached data. Observers follow the published
//! [`DirectoryState`] through a `tokio::sync::watch` channel.

mod state;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use super::DurableStore;
use super::ports::UserDirectorySource;

pub use state::{DirectoryState, LOAD_FAILURE_MESSAGE};

/// Owner of the session's directory snapshot.
pub struct DirectoryCache {
    source: Arc<dyn UserDirectorySource>,
    store: Arc<DurableStore>,
    state: watch::Sender<DirectoryState>,
}

impl DirectoryCache {
    /// Cache reconciling `store` with `source`, starting in `DirectoryState::Bootstrapping`.
    pub fn new(source: Arc<dyn UserDirectorySource>, store: Arc<DurableStore>) -> Self {
        let (state, _) = watch::channel(DirectoryState::Bootstrapping);
        Self {
            source,
            store,
            state,
        }
    }

    /// Follow state changes.
    pub fn subscribe(&self) -> watch::Receiver<DirectoryState> {
        self.state.subscribe()
    }

    /// Most recently published state.
    pub fn current(&self) -> DirectoryState {
        self.state.borrow().clone()
    }

    /// Durable store backing the cache.
    pub fn store(&self) -> &Arc<DurableStore> {
        &self.store
    }

    /// Run one reconciliation and return the terminal state it published.
    ///
    /// The cache read and the remote fetch run concurrently; the fetch
    /// outcome is always applied after the cached data was published. A
    /// later call supersedes an earlier one once it resolves.
    pub async fn reconcile(&self) -> DirectoryState {
        self.state.send_replace(DirectoryState::Bootstrapping);

        let publish_cached = async {
            let cached = self.store.read_all().await;
            self.state
                .send_modify(|state| *state = std::mem::take(state).on_cache_read(cached));
        };
        let ((), fetched) = tokio::join!(publish_cached, self.source.fetch_all());

        let cached_before = self.current();
        if let Ok(records) = &fetched {
            self.store.write_all(records).await;
        }
        let next = cached_before.on_fetch(fetched);
        match &next {
            DirectoryState::Reconciled(snapshot) => {
                info!(count = snapshot.len(), "user directory reconciled");
            }
            DirectoryState::Degraded(snapshot) => {
                warn!(
                    count = snapshot.len(),
                    "user directory fetch failed; using cached data"
                );
            }
            DirectoryState::LoadFailed { message } => {
                error!(%message, "user directory unavailable and no cached data");
            }
            _ => {}
        }
        self.state.send_replace(next.clone());
        next
    }
}
