//! Tiered durable user store.
//!
//! Storage backends are probed once when the store is assembled and
//! registered in preference order. Reads are served from the most preferred
//! tier that has not been found unavailable. A tier reporting
//! [`UserStoreError::Unavailable`] is skipped by later reads; a corrupt entry
//! never takes a tier out of service.
//!
//! Writes always start at the most preferred tier, so the primary tier holds
//! the latest directory whenever it can accept it, and a tier that accepts a
//! write becomes the tier later reads consult. When every tier is
//! unavailable the store reads as empty.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info, warn};

use super::ports::{UserStore, UserStoreError};
use super::{UserId, UserRecord};

/// Organization choices offered when no storage tier can be read.
pub const FALLBACK_ORGANIZATIONS: [&str; 3] = ["Irorun", "Lendsqr", "Paystack"];

/// Durable store fronting an ordered list of storage tiers.
///
/// Callers never observe a storage error: reads degrade to empty results and
/// failed writes are logged and dropped.
pub struct DurableStore {
    tiers: Vec<Arc<dyn UserStore>>,
    active: AtomicUsize,
}

impl DurableStore {
    /// Assemble a store from `tiers`, most preferred first.
    pub fn new(tiers: Vec<Arc<dyn UserStore>>) -> Self {
        Self {
            tiers,
            active: AtomicUsize::new(0),
        }
    }

    /// A store with no usable tier.
    pub fn unavailable() -> Self {
        Self::new(Vec::new())
    }

    /// Name of the tier currently serving reads, if any.
    pub fn active_backend(&self) -> Option<&'static str> {
        self.tiers
            .get(self.active.load(Ordering::SeqCst))
            .map(|tier| tier.backend_name())
    }

    /// Every stored record, or an empty list when no tier can be read.
    pub async fn read_all(&self) -> Vec<UserRecord> {
        self.try_read_all().await.unwrap_or_default()
    }

    /// Replace the stored directory with `records`.
    ///
    /// Tries every tier in preference order, starting with the primary one,
    /// until one accepts the write. The accepting tier serves later reads.
    pub async fn write_all(&self, records: &[UserRecord]) {
        for (index, tier) in self.tiers.iter().enumerate() {
            match tier.write_all(records).await {
                Ok(()) => {
                    debug!(
                        backend = tier.backend_name(),
                        count = records.len(),
                        "persisted user directory"
                    );
                    self.restore(index, tier.as_ref());
                    return;
                }
                Err(error) => self.record_failure(index, tier.as_ref(), &error),
            }
        }
        warn!(
            count = records.len(),
            "no storage tier accepted the user directory; records not persisted"
        );
    }

    /// Look up one record by identifier.
    ///
    /// A stored entry that cannot be decoded reads as absent.
    pub async fn read_one(&self, id: &UserId) -> Option<UserRecord> {
        for (index, tier) in self.readable_tiers() {
            match tier.read_one(id).await {
                Ok(record) => return record,
                Err(UserStoreError::Serialization { message }) => {
                    warn!(
                        backend = tier.backend_name(),
                        user_id = %id,
                        %message,
                        "stored user entry is undecodable; treating it as absent"
                    );
                    return None;
                }
                Err(error) => self.record_failure(index, tier.as_ref(), &error),
            }
        }
        None
    }

    /// Distinct organization values across the stored directory, sorted.
    ///
    /// Reflects the full directory regardless of any active filter. Returns
    /// [`FALLBACK_ORGANIZATIONS`] when no tier can be read.
    pub async fn organizations(&self) -> Vec<String> {
        let Some(records) = self.try_read_all().await else {
            return FALLBACK_ORGANIZATIONS.map(str::to_owned).to_vec();
        };
        records
            .iter()
            .map(UserRecord::organization)
            .filter(|organization| !organization.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    async fn try_read_all(&self) -> Option<Vec<UserRecord>> {
        for (index, tier) in self.readable_tiers() {
            match tier.read_all().await {
                Ok(records) => {
                    debug!(
                        backend = tier.backend_name(),
                        count = records.len(),
                        "read user directory"
                    );
                    return Some(records);
                }
                Err(error) => self.record_failure(index, tier.as_ref(), &error),
            }
        }
        None
    }

    fn readable_tiers(&self) -> impl Iterator<Item = (usize, &Arc<dyn UserStore>)> {
        self.tiers
            .iter()
            .enumerate()
            .skip(self.active.load(Ordering::SeqCst))
    }

    fn record_failure(&self, index: usize, tier: &dyn UserStore, error: &UserStoreError) {
        if !matches!(error, UserStoreError::Unavailable { .. }) {
            warn!(
                backend = tier.backend_name(),
                %error,
                "storage tier operation failed; trying the next tier"
            );
            return;
        }
        let previous = self.active.fetch_max(index + 1, Ordering::SeqCst);
        if previous <= index {
            warn!(
                backend = tier.backend_name(),
                %error,
                "storage tier unavailable; falling back to the next tier"
            );
        }
    }

    fn restore(&self, index: usize, tier: &dyn UserStore) {
        let previous = self.active.swap(index, Ordering::SeqCst);
        if previous > index {
            info!(
                backend = tier.backend_name(),
                "storage tier accepted a write; serving reads from it again"
            );
        }
    }
}

impl Default for DurableStore {
    fn default() -> Self {
        Self::unavailable()
    }
}

#[cfg(test)]
mod tests {
    //! Tier fallback and degradation behaviour.
    use super::*;
    use crate::domain::ports::MockUserStore;
    use crate::test_support::{FailingUserStore, UserFixture};

    fn failing_mock() -> MockUserStore {
        let mut store = MockUserStore::new();
        store.expect_backend_name().return_const("mock-primary");
        store
            .expect_read_all()
            .returning(|| Err(UserStoreError::unavailable("boom")));
        store
            .expect_write_all()
            .returning(|_| Err(UserStoreError::unavailable("boom")));
        store
            .expect_read_one()
            .returning(|_| Err(UserStoreError::unavailable("boom")));
        store
    }

    fn healthy_mock(records: Vec<UserRecord>) -> MockUserStore {
        let mut store = MockUserStore::new();
        store.expect_backend_name().return_const("mock-secondary");
        store
            .expect_read_all()
            .returning(move || Ok(records.clone()));
        store
    }

    #[tokio::test]
    async fn unavailable_store_reads_as_empty() {
        let store = DurableStore::unavailable();

        assert!(store.read_all().await.is_empty());
        let id = UserId::new("1").expect("valid id");
        assert!(store.read_one(&id).await.is_none());
        assert_eq!(store.active_backend(), None);
    }

    #[tokio::test]
    async fn failing_primary_falls_back_to_secondary() {
        let cached = vec![UserFixture::new("7").build()];
        let store = DurableStore::new(vec![
            Arc::new(failing_mock()),
            Arc::new(healthy_mock(cached.clone())),
        ]);

        assert_eq!(store.read_all().await, cached);
        assert_eq!(store.active_backend(), Some("mock-secondary"));
    }

    #[tokio::test]
    async fn every_tier_failing_degrades_to_empty() {
        let store = DurableStore::new(vec![Arc::new(FailingUserStore), Arc::new(failing_mock())]);

        assert!(store.read_all().await.is_empty());
        store.write_all(&[UserFixture::new("1").build()]).await;
        assert_eq!(store.active_backend(), None);
    }

    #[tokio::test]
    async fn demoted_tier_is_not_consulted_again() {
        let mut primary = MockUserStore::new();
        primary.expect_backend_name().return_const("mock-primary");
        primary
            .expect_read_all()
            .times(1)
            .returning(|| Err(UserStoreError::unavailable("boom")));
        let store = DurableStore::new(vec![Arc::new(primary), Arc::new(healthy_mock(Vec::new()))]);

        store.read_all().await;
        store.read_all().await;
    }

    #[tokio::test]
    async fn undecodable_entry_reads_as_absent_and_keeps_the_tier() {
        let cached = vec![UserFixture::new("1").build()];
        let mut tier = healthy_mock(cached.clone());
        tier.expect_read_one()
            .times(1)
            .returning(|_| Err(UserStoreError::serialization("entry user_bad: EOF")));
        tier.expect_write_all().times(1).returning(|_| Ok(()));
        let store = DurableStore::new(vec![Arc::new(tier)]);
        let bad = UserId::new("bad").expect("valid id");

        assert!(store.read_one(&bad).await.is_none());
        store.write_all(&cached).await;

        assert_eq!(store.active_backend(), Some("mock-secondary"));
        assert_eq!(store.read_all().await, cached);
    }

    #[tokio::test]
    async fn write_goes_back_to_a_recovered_primary() {
        let mut primary = MockUserStore::new();
        primary.expect_backend_name().return_const("mock-primary");
        primary
            .expect_read_all()
            .times(1)
            .returning(|| Err(UserStoreError::unavailable("locked")));
        primary.expect_write_all().times(1).returning(|_| Ok(()));
        let store = DurableStore::new(vec![Arc::new(primary), Arc::new(healthy_mock(Vec::new()))]);

        store.read_all().await;
        assert_eq!(store.active_backend(), Some("mock-secondary"));

        store.write_all(&[UserFixture::new("1").build()]).await;
        assert_eq!(store.active_backend(), Some("mock-primary"));
    }

    #[tokio::test]
    async fn organizations_are_distinct_and_sorted() {
        let records = vec![
            UserFixture::new("1").organization("Paystack").build(),
            UserFixture::new("2").organization("Irorun").build(),
            UserFixture::new("3").organization("Paystack").build(),
            UserFixture::new("4").organization("").build(),
        ];
        let store = DurableStore::new(vec![Arc::new(healthy_mock(records))]);

        assert_eq!(store.organizations().await, vec!["Irorun", "Paystack"]);
    }

    #[tokio::test]
    async fn organizations_fall_back_when_no_tier_is_usable() {
        let store = DurableStore::new(vec![Arc::new(FailingUserStore)]);

        assert_eq!(
            store.organizations().await,
            vec!["Irorun", "Lendsqr", "Paystack"]
        );
    }

    #[tokio::test]
    async fn empty_store_offers_no_organizations() {
        let store = DurableStore::new(vec![Arc::new(healthy_mock(Vec::new()))]);

        assert!(store.organizations().await.is_empty());
    }
}
