//! Remote user directory adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `UserDirectorySource` port.

mod dto;
mod http_source;

pub use http_source::HttpUserDirectorySource;
