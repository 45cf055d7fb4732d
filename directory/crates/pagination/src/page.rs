//! Page size validation and slicing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page sizes offered by the table footer, in display order.
pub const ALLOWED_PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

/// Validation errors returned by [`PageSize::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// The value is not one of [`ALLOWED_PAGE_SIZES`].
    #[error("page size {value} is not one of 10, 20, 50 or 100")]
    NotAllowed {
        /// Rejected page size.
        value: u32,
    },
}

/// Number of records rendered per page.
///
/// ## Invariants
/// - The wrapped value is always one of [`ALLOWED_PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    /// Page size used until the user picks another one.
    pub const DEFAULT: Self = Self(50);

    /// Validate and construct a [`PageSize`].
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::NotAllowed`] for values outside
    /// [`ALLOWED_PAGE_SIZES`].
    pub const fn new(value: u32) -> Result<Self, PageSizeError> {
        if matches!(value, 10 | 20 | 50 | 100) {
            Ok(Self(value))
        } else {
            Err(PageSizeError::NotAllowed { value })
        }
    }

    /// Raw number of records per page.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// One-based page number plus page size.
///
/// The page number is not validated here; [`Page::from_slice`] resolves it
/// against the sequence being paged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: u32,
    size: PageSize,
}

impl PageRequest {
    /// Request `page` (one-based) using `size` records per page.
    #[must_use]
    pub const fn new(page: u32, size: PageSize) -> Self {
        Self { page, size }
    }

    /// Request the first page.
    #[must_use]
    pub const fn first(size: PageSize) -> Self {
        Self::new(1, size)
    }

    /// Requested one-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(PageSize::DEFAULT)
    }
}

/// Number of pages needed for `total_items` records.
///
/// Always at least one, so an empty sequence still renders an empty page 1.
///
/// # Examples
///
/// ```
/// use pagination::{PageSize, total_pages};
///
/// let size = PageSize::new(10).expect("allowed size");
/// assert_eq!(total_pages(25, size), 3);
/// assert_eq!(total_pages(0, size), 1);
/// ```
#[must_use]
pub fn total_pages(total_items: usize, size: PageSize) -> u32 {
    let pages = total_items.div_ceil(size.as_usize()).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// A contiguous page of a larger sequence.
///
/// ## Invariants
/// - `page` is within `1..=total_pages`.
/// - `items.len()` never exceeds the page size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    page_size: PageSize,
    total_items: usize,
    total_pages: u32,
    reset_to_first: bool,
}

impl<T: Clone> Page<T> {
    /// Slice the requested page out of `items`.
    ///
    /// A page number of zero or beyond the last page resolves to page 1, and
    /// [`Page::reset_to_first`] reports that the request was out of range.
    #[must_use]
    pub fn from_slice(items: &[T], request: PageRequest) -> Self {
        let size = request.size();
        let total_pages = total_pages(items.len(), size);
        let in_range = (1..=total_pages).contains(&request.page());
        let page = if in_range { request.page() } else { 1 };

        let pages_before = usize::try_from(page.saturating_sub(1)).unwrap_or(usize::MAX);
        let start = pages_before.saturating_mul(size.as_usize());
        let slice = items
            .iter()
            .skip(start)
            .take(size.as_usize())
            .cloned()
            .collect();

        Self {
            items: slice,
            page,
            page_size: size,
            total_items: items.len(),
            total_pages,
            reset_to_first: !in_range,
        }
    }
}

impl<T> Page<T> {
    /// Records on this page, in sequence order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its records.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Resolved one-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size used to slice this page.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Length of the whole sequence that was paged.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages in the whole sequence; at least one.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Number of records on this page.
    #[must_use]
    pub fn displayed_items(&self) -> usize {
        self.items.len()
    }

    /// Whether the requested page was out of range and page 1 was served.
    #[must_use]
    pub const fn reset_to_first(&self) -> bool {
        self.reset_to_first
    }

    /// Transform each record while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, transform: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(transform).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            reset_to_first: self.reset_to_first,
        }
    }
}
