//! # Instagram Basic Display API client
//!
//! A Rust client for the Instagram Basic Display API: the OAuth
//! authorization-code flow, long-lived token management, the user profile and
//! the paginated media feed.
//!
//! ## Overview
//!
//! This crate provides:
//! - Configuration via [`InstagramConfig`] and [`InstagramConfigBuilder`]
//! - App [`Credentials`] loaded from serde or the environment
//! - The OAuth flow and token lifetimes via [`AuthSession`]
//! - Paginated media access via [`MediaPager`]
//! - Typed provider failures via [`InstagramError`] and [`ProviderErrorKind`]
//!
//! ## Quick Start
//!
//! ```rust
//! use instagram_basic_display::{AuthSession, Credentials, InstagramConfig};
//!
//! let config = InstagramConfig::builder()
//!     .credentials(Credentials::new(
//!         "My App",
//!         "your-client-id",
//!         "your-client-secret",
//!         "https://your-app.com/auth/oauth",
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let auth = AuthSession::new(config).unwrap();
//! let url = auth.build_authorize_url(Some("opaque-state")).unwrap();
//! assert!(url.starts_with("https://api.instagram.com/oauth/authorize?client_id=your-client-id&"));
//! ```
//!
//! ## Authentication
//!
//! ```rust,ignore
//! use instagram_basic_display::{AuthSession, Credentials, InstagramConfig};
//!
//! let auth = AuthSession::new(InstagramConfig::new(Credentials::from_env())?)?;
//!
//! // Step 1: redirect the user, keeping the state
//! let begin = auth.begin_auth()?;
//!
//! // Step 2: on the redirect, exchange the code (and upgrade to a 60-day token)
//! let session = auth.authenticate(&code, &state, true).await?;
//!
//! // Step 3: persist the session; refresh it before it expires
//! let session = auth.refresh_long_lived(&session).await?;
//! ```
//!
//! ## Media
//!
//! ```rust,ignore
//! use instagram_basic_display::MediaPager;
//!
//! let pager = MediaPager::new(config)?;
//! let first = pager.fetch_media_list(&session).await?;
//! if let Some(next) = first.next_cursor_url.as_deref() {
//!     let second = pager.fetch_page(next).await?;
//! }
//! ```
//!
//! ## Errors
//!
//! Every operation returns `Result<_, InstagramError>`; nothing is swallowed
//! into a default value. Use [`InstagramError::requires_reauthentication`] to
//! detect rejected tokens.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Caller-owned sessions**: [`Session`] is returned to and stored by the caller
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No retries**: Failures are reported once and left to the caller

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod media;

// Re-export public types at crate root for convenience
pub use auth::{
    AccountType, AuthSession, AuthorizationRequest, BeginAuthResult, LongLivedToken, Session,
    ShortLivedToken, UserProfile,
};
pub use config::{ClientSecret, Credentials, HostUrl, InstagramConfig, InstagramConfigBuilder};
pub use error::{ConfigError, InstagramError};

// Re-export HTTP client types
pub use clients::{ApiClient, HttpError, ProviderErrorKind, ProviderFailure};

// Re-export media types
pub use media::{ChildMediaItem, Cursors, MediaItem, MediaPage, MediaPager, MediaType};
