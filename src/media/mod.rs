//! Media access for the authenticated user.
//!
//! # Overview
//!
//! - [`MediaPager`]: first page, cursor pages, single items and album children
//! - [`MediaPage`]: one page of items plus the cursor to the next one
//! - [`MediaItem`] / [`ChildMediaItem`]: posts and album children
//! - [`MediaType`]: image, video or carousel album

mod models;
mod pager;

pub use models::{
    ChildMediaItem, Cursors, MediaChildren, MediaItem, MediaPage, MediaType, TIMESTAMP_FORMAT,
};
pub use pager::{MediaPager, MEDIA_FIELDS};
