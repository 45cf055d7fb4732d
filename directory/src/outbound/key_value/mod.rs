//! Key-value adapters and the secondary tier of the durable store.
//!
//! - `CapDirKeyValueStore`: one file per key inside a capability-scoped
//!   directory.
//! - `InMemoryKeyValueStore`: process-local map, lost on exit.
//! - `KeyValueUserStore`: stores each record under `user_<id>` on top of
//!   any `KeyValueStore`.

mod cap_dir;
mod in_memory;
mod user_store;

pub use cap_dir::CapDirKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
pub use user_store::{KeyValueUserStore, USER_KEY_PREFIX, user_key};
