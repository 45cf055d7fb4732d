//! Single-use handoff of a selected record to the details view.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{UserId, UserRecord};

/// Prefix of relay entry keys; the record identifier follows it.
pub const RELAY_KEY_PREFIX: &str = "currentUser_";

/// Relay key for `id`.
pub fn relay_key(id: &UserId) -> String {
    format!("{RELAY_KEY_PREFIX}{id}")
}

/// Tab-scoped relay of selected records.
///
/// Entries are consumed by [`SessionRelay::take`]; a second `take` for the
/// same identifier misses. The relay is never the only copy of a record:
/// it only carries records already present in the durable store.
#[derive(Debug, Default)]
pub struct SessionRelay {
    entries: Mutex<HashMap<String, UserRecord>>,
}

impl SessionRelay {
    /// Empty relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `record` for the details view, replacing any earlier entry for
    /// the same identifier.
    pub fn put(&self, record: UserRecord) {
        let key = relay_key(record.id());
        self.lock().insert(key, record);
    }

    /// Remove and return the staged record for `id`.
    pub fn take(&self, id: &UserId) -> Option<UserRecord> {
        self.lock().remove(&relay_key(id))
    }

    /// Number of staged records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no record is staged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, UserRecord>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::UserFixture;

    fn id(value: &str) -> UserId {
        UserId::new(value).expect("valid id")
    }

    #[test]
    fn take_consumes_the_entry() {
        let relay = SessionRelay::new();
        let record = UserFixture::new("42").build();
        relay.put(record.clone());

        assert_eq!(relay.take(&id("42")), Some(record));
        assert_eq!(relay.take(&id("42")), None);
        assert!(relay.is_empty());
    }

    #[test]
    fn take_misses_other_identifiers() {
        let relay = SessionRelay::new();
        relay.put(UserFixture::new("1").build());

        assert_eq!(relay.take(&id("10")), None);
        assert_eq!(relay.len(), 1);
    }

    #[test]
    fn later_put_replaces_entry() {
        let relay = SessionRelay::new();
        relay.put(UserFixture::new("5").username("first").build());
        relay.put(UserFixture::new("5").username("second").build());

        let taken = relay.take(&id("5")).expect("staged record");
        assert_eq!(taken.username(), "second");
        assert!(relay.is_empty());
    }

    #[test]
    fn keys_carry_the_relay_prefix() {
        assert_eq!(relay_key(&id("17")), "currentUser_17");
    }
}
