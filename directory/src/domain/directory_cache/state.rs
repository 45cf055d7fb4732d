//! Orchestrator states and their transitions.

use tracing::debug;

use crate::domain::ports::UserDirectorySourceError;
use crate::domain::{DirectorySnapshot, UserRecord};

/// Message surfaced when there is no data to show.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load users. Please try again later.";

/// Published state of the directory cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DirectoryState {
    /// Nothing read yet.
    #[default]
    Bootstrapping,
    /// Durable store held records; shown while the fetch is in flight.
    ServingCached(DirectorySnapshot),
    /// Durable store was empty; the caller shows a blocking spinner.
    ServingEmpty,
    /// The remote fetch succeeded and its records replaced the snapshot.
    Reconciled(DirectorySnapshot),
    /// The remote fetch failed; cached records remain on screen without an
    /// error.
    Degraded(DirectorySnapshot),
    /// The remote fetch failed with nothing cached.
    LoadFailed { message: String },
}

impl DirectoryState {
    /// Apply the durable store read. Only `Bootstrapping` moves.
    pub fn on_cache_read(self, cached: Vec<UserRecord>) -> Self {
        match self {
            Self::Bootstrapping if cached.is_empty() => Self::ServingEmpty,
            Self::Bootstrapping => Self::ServingCached(DirectorySnapshot::new(cached)),
            other => other,
        }
    }

    /// Apply the remote fetch outcome.
    ///
    /// Failures degrade silently whenever a non-empty snapshot is on screen
    /// and surface [`LOAD_FAILURE_MESSAGE`] otherwise.
    pub fn on_fetch(self, fetched: Result<Vec<UserRecord>, UserDirectorySourceError>) -> Self {
        let error = match fetched {
            Ok(records) => return Self::Reconciled(DirectorySnapshot::new(records)),
            Err(error) => error,
        };
        debug!(%error, "remote fetch failed");
        match self.into_snapshot() {
            Some(snapshot) if !snapshot.is_empty() => Self::Degraded(snapshot),
            _ => Self::LoadFailed {
                message: LOAD_FAILURE_MESSAGE.to_owned(),
            },
        }
    }

    /// Snapshot on screen, if any.
    pub fn snapshot(&self) -> Option<&DirectorySnapshot> {
        match self {
            Self::ServingCached(snapshot)
            | Self::Reconciled(snapshot)
            | Self::Degraded(snapshot) => Some(snapshot),
            Self::Bootstrapping | Self::ServingEmpty | Self::LoadFailed { .. } => None,
        }
    }

    /// Whether the caller should show a blocking loading indicator.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Bootstrapping | Self::ServingEmpty)
    }

    /// User-visible error, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::LoadFailed { message } => Some(message),
            _ => None,
        }
    }

    /// Whether no further transition is pending for this reconciliation.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Reconciled(_) | Self::Degraded(_) | Self::LoadFailed { .. }
        )
    }

    fn into_snapshot(self) -> Option<DirectorySnapshot> {
        match self {
            Self::ServingCached(snapshot)
            | Self::Reconciled(snapshot)
            | Self::Degraded(snapshot) => Some(snapshot),
            Self::Bootstrapping | Self::ServingEmpty | Self::LoadFailed { .. } => None,
        }
    }
}
