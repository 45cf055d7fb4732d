//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod key_value_store;
mod user_directory_source;
mod user_store;

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
#[cfg(test)]
pub use user_directory_source::MockUserDirectorySource;
pub use user_directory_source::{UserDirectorySource, UserDirectorySourceError};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
