//! Read-only query engine over a directory snapshot.
//!
//! Every function here is pure: the same snapshot, criteria and page request
//! always give the same page in the same order, so callers may re-run a query
//! on every keystroke.

use pagination::{Page, PageRequest};

use super::{DirectorySnapshot, FilterCriteria, UserRecord};

/// One page of user records plus filtered totals.
pub type UserPage = Page<UserRecord>;

/// Records matching `criteria`, in snapshot order.
pub fn filter<'a>(snapshot: &'a DirectorySnapshot, criteria: &FilterCriteria) -> Vec<&'a UserRecord> {
    snapshot
        .records()
        .iter()
        .filter(|record| criteria.matches(record))
        .collect()
}

/// Filter the snapshot and slice the requested page out of the result.
///
/// `total_items` and `total_pages` on the returned page describe the filtered
/// sequence. A page beyond the last one resolves to page 1.
pub fn apply(
    snapshot: &DirectorySnapshot,
    criteria: &FilterCriteria,
    request: PageRequest,
) -> UserPage {
    let matching = filter(snapshot, criteria);
    Page::from_slice(&matching, request).map(UserRecord::clone)
}

#[cfg(test)]
mod tests {
    //! Query engine coverage for filtering, paging and aggregate isolation.

    use super::*;
    use crate::domain::UserStatus;
    use crate::test_support::UserFixture;
    use pagination::PageSize;
    use rstest::{fixture, rstest};

    fn ids(page: &UserPage) -> Vec<&str> {
        page.items().iter().map(|r| r.id().as_str()).collect()
    }

    fn size(value: u32) -> PageSize {
        PageSize::new(value).expect("allowed page size")
    }

    #[fixture]
    fn pair() -> DirectorySnapshot {
        DirectorySnapshot::new(vec![
            UserFixture::new("1")
                .status(UserStatus::Active)
                .loan("₦0.00")
                .build(),
            UserFixture::new("2")
                .status(UserStatus::Inactive)
                .loan("₦50,000.00")
                .build(),
        ])
    }

    #[fixture]
    fn twenty_five() -> DirectorySnapshot {
        DirectorySnapshot::new(
            (1..=25)
                .map(|n| {
                    let org = if n <= 5 { "Irorun" } else { "Lendsqr" };
                    UserFixture::new(&n.to_string()).organization(org).build()
                })
                .collect(),
        )
    }

    #[rstest]
    fn summary_counts_cover_the_full_snapshot(pair: DirectorySnapshot) {
        let summary = pair.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.with_loans, 1);
    }

    #[rstest]
    fn status_filter_returns_only_matching_users(pair: DirectorySnapshot) {
        let criteria = FilterCriteria::new().with_status(UserStatus::Active);
        let page = apply(&pair, &criteria, PageRequest::default());

        assert_eq!(ids(&page), vec!["1"]);
        assert_eq!(page.total_items(), 1);
        assert_eq!(pair.summary().total, 2, "tiles ignore the filter");
    }

    #[rstest]
    fn third_page_of_twenty_five_holds_five(twenty_five: DirectorySnapshot) {
        let page = apply(
            &twenty_five,
            &FilterCriteria::new(),
            PageRequest::new(3, size(10)),
        );

        assert_eq!(ids(&page), vec!["21", "22", "23", "24", "25"]);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_items(), 25);
    }

    #[rstest]
    fn shrinking_filter_resets_to_first_page(twenty_five: DirectorySnapshot) {
        let criteria = FilterCriteria::new().with_organization("Irorun");
        let page = apply(&twenty_five, &criteria, PageRequest::new(3, size(10)));

        assert_eq!(page.page(), 1);
        assert!(page.reset_to_first());
        assert_eq!(ids(&page), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(page.total_pages(), 1);
    }

    #[rstest]
    fn page_past_the_end_serves_first_page(twenty_five: DirectorySnapshot) {
        let first = apply(&twenty_five, &FilterCriteria::new(), PageRequest::new(1, size(10)));
        let past = apply(&twenty_five, &FilterCriteria::new(), PageRequest::new(4, size(10)));

        assert_eq!(ids(&past), ids(&first));
    }

    #[rstest]
    fn repeated_queries_are_identical(twenty_five: DirectorySnapshot) {
        let criteria = FilterCriteria::new().with_organization("Lendsqr");
        let request = PageRequest::new(2, size(10));

        assert_eq!(
            apply(&twenty_five, &criteria, request),
            apply(&twenty_five, &criteria, request)
        );
    }

    #[rstest]
    fn every_returned_record_matches_and_no_excluded_record_does(twenty_five: DirectorySnapshot) {
        let criteria = FilterCriteria::new().with_organization("Lendsqr").with_username("user1");
        let included = filter(&twenty_five, &criteria);

        assert!(included.iter().all(|r| criteria.matches(r)));
        let excluded = twenty_five
            .records()
            .iter()
            .filter(|r| !included.iter().any(|i| i.id() == r.id()));
        assert!(excluded.into_iter().all(|r| !criteria.matches(r)));
        assert!(!included.is_empty());
    }
}
