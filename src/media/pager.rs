//! Paginated access to a user's media.
//!
//! The first page is requested with an explicit field list. Later pages are
//! fetched from the absolute `next` URL the provider returns, so cursor URLs
//! are opaque to the client. Pages are handed back one at a time; callers
//! own any accumulation.
//!
//! # Example
//!
//! ```rust,ignore
//! use instagram_basic_display::MediaPager;
//!
//! let pager = MediaPager::new(config)?;
//!
//! let mut page = pager.fetch_media_list(&session).await?;
//! let mut items = page.items;
//! while let Some(next) = page.next_cursor_url.as_deref() {
//!     page = pager.fetch_page(next).await?;
//!     items.extend(page.items.iter().cloned());
//! }
//! ```

use std::collections::HashSet;

use crate::auth::oauth::CURRENT_USER;
use crate::auth::Session;
use crate::clients::ApiClient;
use crate::config::InstagramConfig;
use crate::error::{require_argument, InstagramError};
use crate::media::models::MediaListResponse;
use crate::media::{ChildMediaItem, MediaItem, MediaPage};

const CHILD_FIELDS: &str = "id,media_type,media_url,permalink,thumbnail_url,username,timestamp";

/// Field list for media list and single media requests.
pub const MEDIA_FIELDS: &str = "caption,id,media_type,media_url,permalink,thumbnail_url,username,timestamp,children{id,media_type,media_url,permalink,thumbnail_url,username,timestamp}";

/// Client for the media endpoints.
///
/// # Thread Safety
///
/// `MediaPager` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct MediaPager {
    config: InstagramConfig,
    client: ApiClient,
}

// Verify MediaPager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MediaPager>();
};

impl MediaPager {
    /// Creates a new `MediaPager` with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the HTTP client cannot be built.
    pub fn new(config: InstagramConfig) -> Result<Self, InstagramError> {
        let client = ApiClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Creates a new `MediaPager` sharing an existing [`ApiClient`].
    #[must_use]
    pub const fn with_client(config: InstagramConfig, client: ApiClient) -> Self {
        Self { config, client }
    }

    /// Fetches the first page of the session user's media.
    ///
    /// # Errors
    ///
    /// Same as [`MediaPager::fetch_first_page`].
    pub async fn fetch_media_list(&self, session: &Session) -> Result<MediaPage, InstagramError> {
        self.fetch_first_page(&session.access_token, Some(&session.user.id))
            .await
    }

    /// Fetches the first page of a user's media.
    ///
    /// `user_id` defaults to the token's owner.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Config`] if any credential is blank
    /// - [`InstagramError::InvalidArgument`] if `access_token` or `user_id` is
    ///   blank; no request is sent
    /// - [`InstagramError::Provider`] / [`InstagramError::Http`] on failure
    pub async fn fetch_first_page(
        &self,
        access_token: &str,
        user_id: Option<&str>,
    ) -> Result<MediaPage, InstagramError> {
        self.config.credentials().validate()?;
        require_argument(access_token, "access_token")?;
        let user_id = user_id.unwrap_or(CURRENT_USER);
        require_argument(user_id, "user_id")?;

        let url = format!(
            "{}?fields={}&access_token={}",
            self.config
                .graph_host()
                .join(&format!("{}/media", urlencoding::encode(user_id))),
            MEDIA_FIELDS,
            urlencoding::encode(access_token),
        );

        let response: MediaListResponse = self.client.get_json("fetch_first_page", &url).await?;
        Ok(response.into())
    }

    /// Fetches the page behind a `next` cursor URL.
    ///
    /// If the provider hands back `cursor_url` itself as the next cursor, the
    /// returned page has no next cursor so that paging terminates.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Config`] if any credential is blank
    /// - [`InstagramError::InvalidArgument`] if `cursor_url` is blank
    /// - [`InstagramError::Provider`] / [`InstagramError::Http`] on failure
    pub async fn fetch_page(&self, cursor_url: &str) -> Result<MediaPage, InstagramError> {
        self.config.credentials().validate()?;
        require_argument(cursor_url, "cursor_url")?;

        let response: MediaListResponse = self.client.get_json("fetch_page", cursor_url).await?;
        let mut page = MediaPage::from(response);

        if page.next_cursor_url.as_deref() == Some(cursor_url) {
            tracing::warn!("Media cursor points back at the current page, stopping pagination");
            page.next_cursor_url = None;
        }

        Ok(page)
    }

    /// Fetches every page of a user's media, first page first.
    ///
    /// Stops on the last page, or when a cursor URL repeats.
    ///
    /// # Errors
    ///
    /// Same as [`MediaPager::fetch_first_page`]. Pages fetched before a
    /// failure are discarded.
    pub async fn fetch_all_pages(
        &self,
        access_token: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<MediaPage>, InstagramError> {
        let first = self.fetch_first_page(access_token, user_id).await?;
        let mut next = first.next_cursor_url.clone();
        let mut pages = vec![first];
        let mut visited = HashSet::new();

        while let Some(cursor_url) = next {
            if !visited.insert(cursor_url.clone()) {
                tracing::warn!(
                    pages = pages.len(),
                    "Media cursor repeated, stopping pagination"
                );
                break;
            }

            let page = self.fetch_page(&cursor_url).await?;
            next = page.next_cursor_url.clone();
            pages.push(page);
        }

        tracing::debug!(pages = pages.len(), "Fetched all media pages");

        Ok(pages)
    }

    /// Fetches a single media item.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Config`] if any credential is blank
    /// - [`InstagramError::InvalidArgument`] if `access_token` or `media_id` is blank
    /// - [`InstagramError::Provider`] / [`InstagramError::Http`] on failure
    pub async fn fetch_single_item(
        &self,
        access_token: &str,
        media_id: &str,
    ) -> Result<MediaItem, InstagramError> {
        self.config.credentials().validate()?;
        require_argument(access_token, "access_token")?;
        require_argument(media_id, "media_id")?;

        let url = self.item_url(media_id, MEDIA_FIELDS, access_token);
        self.client.get_json("fetch_single_item", &url).await
    }

    /// Fetches a single album child.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Config`] if any credential is blank
    /// - [`InstagramError::InvalidArgument`] if `access_token` or
    ///   `child_media_id` is blank
    /// - [`InstagramError::Provider`] / [`InstagramError::Http`] on failure
    pub async fn fetch_child_item(
        &self,
        access_token: &str,
        child_media_id: &str,
    ) -> Result<ChildMediaItem, InstagramError> {
        self.config.credentials().validate()?;
        require_argument(access_token, "access_token")?;
        require_argument(child_media_id, "child_media_id")?;

        let url = self.item_url(child_media_id, CHILD_FIELDS, access_token);
        self.client.get_json("fetch_child_item", &url).await
    }

    /// Fetches a single media item with the session's token.
    ///
    /// # Errors
    ///
    /// Same as [`MediaPager::fetch_single_item`], and
    /// [`InstagramError::InvalidArgument`] if the session's user id is blank.
    pub async fn fetch_session_item(
        &self,
        session: &Session,
        media_id: &str,
    ) -> Result<MediaItem, InstagramError> {
        self.config.credentials().validate()?;
        require_argument(&session.user.id, "user_id")?;
        self.fetch_single_item(&session.access_token, media_id).await
    }

    /// Fetches a single album child with the session's token.
    ///
    /// # Errors
    ///
    /// Same as [`MediaPager::fetch_child_item`], and
    /// [`InstagramError::InvalidArgument`] if the session's user id is blank.
    pub async fn fetch_session_child_item(
        &self,
        session: &Session,
        child_media_id: &str,
    ) -> Result<ChildMediaItem, InstagramError> {
        self.config.credentials().validate()?;
        require_argument(&session.user.id, "user_id")?;
        self.fetch_child_item(&session.access_token, child_media_id)
            .await
    }

    fn item_url(&self, media_id: &str, fields: &str, access_token: &str) -> String {
        format!(
            "{}?fields={}&access_token={}",
            self.config.graph_host().join(&urlencoding::encode(media_id)),
            fields,
            urlencoding::encode(access_token),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::error::ConfigError;

    fn create_test_pager() -> MediaPager {
        MediaPager::new(
            InstagramConfig::new(Credentials::new(
                "Unit Testing Instagram Basic Display API",
                "123",
                "a4b4c4d4e4",
                "http://www.localhost:5000/auth/oauth",
            ))
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_item_url_uses_field_list() {
        let pager = create_test_pager();

        assert_eq!(
            pager.item_url("17", CHILD_FIELDS, "tok en"),
            "https://graph.instagram.com/17?fields=id,media_type,media_url,permalink,thumbnail_url,username,timestamp&access_token=tok%20en"
        );
    }

    #[tokio::test]
    async fn test_blank_arguments_are_rejected() {
        let pager = create_test_pager();

        assert!(matches!(
            pager.fetch_first_page(" ", None).await,
            Err(InstagramError::InvalidArgument {
                field: "access_token"
            })
        ));
        assert!(matches!(
            pager.fetch_first_page("token", Some("")).await,
            Err(InstagramError::InvalidArgument { field: "user_id" })
        ));
        assert!(matches!(
            pager.fetch_single_item("token", "").await,
            Err(InstagramError::InvalidArgument { field: "media_id" })
        ));
        assert!(matches!(
            pager.fetch_child_item("", "17").await,
            Err(InstagramError::InvalidArgument {
                field: "access_token"
            })
        ));
        assert!(matches!(
            pager.fetch_page("").await,
            Err(InstagramError::InvalidArgument {
                field: "cursor_url"
            })
        ));
    }

    #[tokio::test]
    async fn test_blank_credentials_fail_first() {
        let pager = MediaPager::new(
            InstagramConfig::new(Credentials::new("app", "1", "secret", "")).unwrap(),
        )
        .unwrap();

        assert!(matches!(
            pager.fetch_single_item("", "").await,
            Err(InstagramError::Config(ConfigError::MissingCredential {
                field: "redirect_url"
            }))
        ));
    }
}
