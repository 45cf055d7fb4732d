//! In-memory, point-in-time copy of the directory.

use std::sync::Arc;

use super::{UserId, UserRecord};

/// Aggregate counts shown in the summary tiles.
///
/// Always computed over the full snapshot, never over a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    /// Number of users in the directory.
    pub total: usize,
    /// Users whose status is `Active`.
    pub active: usize,
    /// Users with a non-zero loan repayment.
    pub with_loans: usize,
}

impl SummaryCounts {
    /// Count over `records`.
    pub fn from_records(records: &[UserRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut counts, record| {
                if record.status() == super::UserStatus::Active {
                    counts.active += 1;
                }
                if record.has_outstanding_loan() {
                    counts.with_loans += 1;
                }
                counts
            },
        )
    }
}

/// Ordered directory snapshot owned by the directory cache.
///
/// Cloning is cheap; records are shared. The snapshot is immutable, so a
/// reconciliation builds a new one and its counts with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    records: Arc<[UserRecord]>,
    summary: SummaryCounts,
}

impl DirectorySnapshot {
    /// Build a snapshot and its summary counts.
    pub fn new(records: Vec<UserRecord>) -> Self {
        let summary = SummaryCounts::from_records(&records);
        Self {
            records: records.into(),
            summary,
        }
    }

    /// Snapshot holding no records.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Records in directory order.
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts for the summary tiles.
    pub fn summary(&self) -> SummaryCounts {
        self.summary
    }

    /// Find a record by identifier.
    pub fn find(&self, id: &UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id() == id)
    }
}

impl Default for DirectorySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
