//! Dashboard view model over the query engine.
//!
//! Holds the filter, page and page-size state of the users table and turns
//! a snapshot into the values the table, summary tiles and pagination
//! controls render.

use std::sync::Arc;

use pagination::{PageLink, PageRequest, PageSize, page_window};
use tracing::debug;

use super::query::{self, UserPage};
use super::{DirectorySnapshot, FilterCriteria, SessionRelay, SummaryCounts, UserId};

/// Route of the details view for `id`.
pub fn detail_route(id: &UserId) -> String {
    format!("/users/{id}")
}

/// Everything the dashboard renders for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Rows of the current page.
    pub page: UserPage,
    /// Tiles, computed over the unfiltered snapshot.
    pub summary: SummaryCounts,
    /// Pagination controls.
    pub links: Vec<PageLink>,
}

impl DashboardView {
    /// Rows shown on the current page.
    pub fn displayed_items(&self) -> usize {
        self.page.displayed_items()
    }
}

/// Filter and pagination state of the users table.
#[derive(Debug, Clone)]
pub struct DashboardState {
    criteria: FilterCriteria,
    page: u32,
    page_size: PageSize,
    relay: Arc<SessionRelay>,
}

impl DashboardState {
    /// Table state on page 1 with no filters, staging selections in `relay`.
    pub fn new(relay: Arc<SessionRelay>, page_size: PageSize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
            page_size,
            relay,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Requested page, 1-based.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Overlay `update` on the current criteria and return to page 1.
    pub fn apply_filters(&mut self, update: FilterCriteria) {
        self.criteria = std::mem::take(&mut self.criteria).merge(update);
        self.page = 1;
    }

    /// Drop every criterion and return to page 1.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    /// Change the page size, keeping the requested page.
    ///
    /// The next [`view`](Self::view) resets to page 1 if the page no longer
    /// exists.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
    }

    /// Render `snapshot` under the current state.
    ///
    /// When the requested page is out of range the view shows page 1 and the
    /// state follows it.
    pub fn view(&mut self, snapshot: &DirectorySnapshot) -> DashboardView {
        let page = query::apply(
            snapshot,
            &self.criteria,
            PageRequest::new(self.page, self.page_size),
        );
        if page.reset_to_first() {
            debug!(requested = self.page, "page out of range; showing page 1");
            self.page = 1;
        }
        let links = page_window(page.page(), page.total_pages());
        DashboardView {
            page,
            summary: snapshot.summary(),
            links,
        }
    }

    /// Stage the selected row for the details view and return its route.
    ///
    /// Identifiers missing from `snapshot` still navigate; the details view
    /// then falls back to the durable store.
    pub fn select_user(&self, snapshot: &DirectorySnapshot, id: &UserId) -> String {
        if let Some(record) = snapshot.find(id) {
            self.relay.put(record.clone());
        }
        detail_route(id)
    }
}
