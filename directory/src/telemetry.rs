//! Tracing subscriber setup for embedding shells.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! embedder's call.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a JSON `fmt` subscriber filtered by `RUST_LOG`.
///
/// A subscriber that is already installed is kept, and a warning is logged
/// through it.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
