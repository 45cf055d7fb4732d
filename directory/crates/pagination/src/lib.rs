//! Page sizing, page slicing and page-link windows for directory tables.
//!
//! The directory table pages over an in-memory, already filtered sequence.
//! This crate owns the arithmetic so every caller agrees on what "page 3 of
//! 25 records" means:
//!
//! - [`PageSize`] restricts page sizes to the footer's fixed choices.
//! - [`Page::from_slice`] slices one page out of a sequence, resolving
//!   out-of-range page numbers to page 1.
//! - [`page_window`] renders pager controls with ellipses once there are more
//!   than five pages.
//!
//! # Example
//!
//! ```
//! use pagination::{Page, PageLink, PageRequest, PageSize, page_window};
//!
//! let records: Vec<u32> = (1..=25).collect();
//! let size = PageSize::new(10).expect("allowed size");
//! let page = Page::from_slice(&records, PageRequest::new(3, size));
//!
//! assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
//! assert_eq!(page.total_pages(), 3);
//! assert_eq!(
//!     page_window(page.page(), page.total_pages()),
//!     vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)],
//! );
//! ```

mod page;
mod window;

pub use page::{ALLOWED_PAGE_SIZES, Page, PageRequest, PageSize, PageSizeError, total_pages};
pub use window::{MAX_VISIBLE_PAGES, PageLink, page_window};
