//! Windowed page-link rendering for pager controls.

use serde::Serialize;

/// Page count up to which every page gets its own link.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// One control in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageLink {
    /// Link to a one-based page number.
    Page(u32),
    /// Gap standing in for skipped page numbers.
    Ellipsis,
}

/// Build the pager links for `current` out of `total_pages`.
///
/// - Up to [`MAX_VISIBLE_PAGES`] pages: every page.
/// - Near the start (`current <= 3`): `1 2 3 … last`.
/// - Near the end (`current >= last - 2`): `1 … last-3 last-2 last-1 last`.
/// - Otherwise: `1 … current-1 current current+1 … last`.
///
/// # Examples
///
/// ```
/// use pagination::{PageLink, page_window};
///
/// assert_eq!(
///     page_window(5, 10),
///     vec![
///         PageLink::Page(1),
///         PageLink::Ellipsis,
///         PageLink::Page(4),
///         PageLink::Page(5),
///         PageLink::Page(6),
///         PageLink::Ellipsis,
///         PageLink::Page(10),
///     ],
/// );
/// ```
#[must_use]
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let mut links = Vec::with_capacity(7);
    if current <= 3 {
        links.extend((1..=3).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total_pages));
    } else if current >= total_pages.saturating_sub(2) {
        links.push(PageLink::Page(1));
        links.push(PageLink::Ellipsis);
        links.extend((total_pages.saturating_sub(3)..=total_pages).map(PageLink::Page));
    } else {
        links.push(PageLink::Page(1));
        links.push(PageLink::Ellipsis);
        links.extend((current.saturating_sub(1)..=current.saturating_add(1)).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total_pages));
    }
    links
}
