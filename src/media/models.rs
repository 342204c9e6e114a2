//! Media payloads returned by the Graph API.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Format of [`MediaItem::timestamp`], e.g. `2020-01-01T12:00:00+0000`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// The kind of a media item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    /// A single image.
    Image,
    /// A single video.
    Video,
    /// An album holding several images or videos.
    CarouselAlbum,
    /// A media type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// An item inside a carousel album.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildMediaItem {
    /// The media id.
    pub id: String,

    /// The media type.
    pub media_type: MediaType,

    /// URL of the image or video. Absent for copyright-flagged videos.
    #[serde(default)]
    pub media_url: Option<String>,

    /// Permanent link to the item on Instagram.
    #[serde(default)]
    pub permalink: String,

    /// Thumbnail URL, only present for videos.
    #[serde(default)]
    pub thumbnail_url: Option<String>,

    /// Owner's handle.
    #[serde(default)]
    pub username: String,

    /// Publish time as sent by the provider.
    #[serde(default)]
    pub timestamp: String,
}

impl ChildMediaItem {
    /// Parses [`ChildMediaItem::timestamp`].
    ///
    /// # Errors
    ///
    /// Returns the parse error if the timestamp is not in [`TIMESTAMP_FORMAT`].
    pub fn published_at(&self) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
    }
}

/// Wrapper the provider puts around album children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaChildren {
    /// The children in album order.
    #[serde(default)]
    pub data: Vec<ChildMediaItem>,
}

/// A post on the user's profile.
///
/// # Example
///
/// ```rust
/// use instagram_basic_display::{MediaItem, MediaType};
///
/// let item: MediaItem = serde_json::from_str(r#"{
///     "id": "17895695668004550",
///     "media_type": "IMAGE",
///     "media_url": "https://scontent.cdninstagram.com/image.jpg",
///     "permalink": "https://www.instagram.com/p/B8kb/",
///     "username": "solrevdev",
///     "timestamp": "2020-02-14T09:10:11+0000"
/// }"#).unwrap();
///
/// assert_eq!(item.media_type, MediaType::Image);
/// assert!(item.children().is_empty());
/// assert!(item.published_at().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// The media id.
    pub id: String,

    /// The caption. Absent for album children and uncaptioned posts.
    #[serde(default)]
    pub caption: Option<String>,

    /// The media type.
    pub media_type: MediaType,

    /// URL of the image or video. Absent for copyright-flagged videos.
    #[serde(default)]
    pub media_url: Option<String>,

    /// Permanent link to the post on Instagram.
    #[serde(default)]
    pub permalink: String,

    /// Thumbnail URL, only present for videos.
    #[serde(default)]
    pub thumbnail_url: Option<String>,

    /// Owner's handle.
    #[serde(default)]
    pub username: String,

    /// Publish time as sent by the provider.
    #[serde(default)]
    pub timestamp: String,

    /// Album children, only present for [`MediaType::CarouselAlbum`].
    #[serde(default)]
    pub children: Option<MediaChildren>,
}

impl MediaItem {
    /// Returns `true` for carousel albums.
    #[must_use]
    pub fn is_album(&self) -> bool {
        self.media_type == MediaType::CarouselAlbum
    }

    /// Returns the album children, or an empty slice.
    #[must_use]
    pub fn children(&self) -> &[ChildMediaItem] {
        self.children.as_ref().map_or(&[][..], |c| c.data.as_slice())
    }

    /// Parses [`MediaItem::timestamp`].
    ///
    /// # Errors
    ///
    /// Returns the parse error if the timestamp is not in [`TIMESTAMP_FORMAT`].
    pub fn published_at(&self) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
    }
}

/// Paging cursors for the media list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    /// Cursor pointing at the start of the page.
    #[serde(default)]
    pub before: Option<String>,

    /// Cursor pointing at the end of the page.
    #[serde(default)]
    pub after: Option<String>,
}

/// One page of a user's media.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaPage {
    /// Items on this page, newest first.
    pub items: Vec<MediaItem>,

    /// Absolute URL of the next page. `None` on the last page.
    pub next_cursor_url: Option<String>,

    /// Absolute URL of the previous page.
    pub previous_cursor_url: Option<String>,

    /// The provider's raw cursors.
    pub cursors: Option<Cursors>,
}

impl MediaPage {
    /// Returns `true` if another page can be fetched.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_cursor_url.is_some()
    }
}

/// Wire shape of the media list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct MediaListResponse {
    #[serde(default)]
    data: Vec<MediaItem>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Debug, Default, Deserialize)]
struct Paging {
    #[serde(default)]
    cursors: Option<Cursors>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
}

fn non_blank(url: Option<String>) -> Option<String> {
    url.filter(|u| !u.trim().is_empty())
}

impl From<MediaListResponse> for MediaPage {
    fn from(response: MediaListResponse) -> Self {
        let paging = response.paging.unwrap_or_default();
        Self {
            items: response.data,
            next_cursor_url: non_blank(paging.next),
            previous_cursor_url: non_blank(paging.previous),
            cursors: paging.cursors,
        }
    }
}
