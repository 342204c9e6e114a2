//! The authorization-code flow.
//!
//! [`AuthSession`] walks a user through the provider's OAuth flow and
//! manages token lifetimes:
//!
//! ```text
//! Unauthenticated --authenticate--> Authenticated(short)
//!                 --escalate_to_long_lived--> Authenticated(long)
//!                 --refresh_long_lived--> Authenticated(long)
//! ```
//!
//! The state lives in the [`Session`] the caller holds; `AuthSession` itself
//! is stateless and can be shared freely.
//!
//! # Example
//!
//! ```rust,ignore
//! use instagram_basic_display::{AuthSession, Credentials, InstagramConfig};
//!
//! let config = InstagramConfig::new(Credentials::from_env())?;
//! let auth = AuthSession::new(config)?;
//!
//! // 1. Redirect the user
//! let begin = auth.begin_auth()?;
//!
//! // 2. On the redirect, verify state and finish the flow
//! assert!(begin.state.matches(&query.state));
//! let session = auth.authenticate(&query.code, &query.state, true).await?;
//!
//! // 3. Roughly every 60 days
//! let session = auth.refresh_long_lived(&session).await?;
//! ```

use crate::auth::oauth::authorize::{build_authorize_url, BeginAuthResult};
use crate::auth::oauth::AuthorizationRequest;
use crate::auth::{LongLivedToken, Session, ShortLivedToken, UserProfile};
use crate::clients::ApiClient;
use crate::config::InstagramConfig;
use crate::error::{require_argument, InstagramError};

const TOKEN_PATH: &str = "oauth/access_token";
const EXCHANGE_PATH: &str = "access_token";
const REFRESH_PATH: &str = "refresh_access_token";
const PROFILE_FIELDS: &str = "account_type,id,media_count,username";

/// User id alias for the owner of the access token.
pub const CURRENT_USER: &str = "me";

/// Client for the OAuth flow and the user profile endpoint.
///
/// # Thread Safety
///
/// `AuthSession` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct AuthSession {
    config: InstagramConfig,
    client: ApiClient,
}

// Verify AuthSession is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthSession>();
};

impl AuthSession {
    /// Creates a new `AuthSession` with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the HTTP client cannot be built.
    pub fn new(config: InstagramConfig) -> Result<Self, InstagramError> {
        let client = ApiClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Creates a new `AuthSession` sharing an existing [`ApiClient`].
    #[must_use]
    pub const fn with_client(config: InstagramConfig, client: ApiClient) -> Self {
        Self { config, client }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &InstagramConfig {
        &self.config
    }

    /// Builds the URL to send the user's browser to.
    ///
    /// `state` is passed through opaquely and defaults to an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Config`] if any credential is blank.
    pub fn build_authorize_url(&self, state: Option<&str>) -> Result<String, InstagramError> {
        Ok(build_authorize_url(&self.config, state.unwrap_or_default())?)
    }

    /// Starts an authorization attempt with a freshly generated state.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Config`] if any credential is blank.
    pub fn begin_auth(&self) -> Result<BeginAuthResult, InstagramError> {
        let state = AuthorizationRequest::new();
        let auth_url = build_authorize_url(&self.config, state.as_ref())?;

        tracing::debug!("Starting Instagram authorization");

        Ok(BeginAuthResult { auth_url, state })
    }

    /// Completes the flow for the `code` and `state` received on the redirect.
    ///
    /// The steps run strictly in order and any failure aborts the flow:
    ///
    /// 1. exchange the code for a short-lived token
    /// 2. if `escalate_to_long_lived`, exchange that for a long-lived token
    /// 3. fetch the user's profile with the resulting token
    ///
    /// When step 2 yields no token, the short-lived token is kept.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Config`] if any credential is blank
    /// - [`InstagramError::InvalidArgument`] if `code` is blank
    /// - [`InstagramError::Provider`] / [`InstagramError::Http`] from any step
    pub async fn authenticate(
        &self,
        code: &str,
        state: &str,
        escalate_to_long_lived: bool,
    ) -> Result<Session, InstagramError> {
        let short_lived = self.exchange_code(code, state).await?;
        let mut access_token = short_lived.access_token;

        if escalate_to_long_lived {
            match self.exchange_for_long_lived_token(&access_token).await? {
                Some(long_lived) => access_token = long_lived.access_token,
                None => tracing::warn!(
                    user_id = %short_lived.user_id,
                    "No long-lived token issued, keeping the short-lived token"
                ),
            }
        }

        let user = self
            .fetch_user_by_token(&access_token, Some(&short_lived.user_id))
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Instagram user authenticated");

        Ok(Session::new(access_token, user))
    }

    /// Exchanges an authorization code for a short-lived token.
    ///
    /// # Errors
    ///
    /// Same as [`AuthSession::authenticate`].
    pub async fn exchange_code(
        &self,
        code: &str,
        state: &str,
    ) -> Result<ShortLivedToken, InstagramError> {
        let credentials = self.config.credentials();
        credentials.validate()?;
        require_argument(code, "code")?;

        let url = self.config.auth_host().join(TOKEN_PATH);
        let fields = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_ref()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", credentials.redirect_url.as_str()),
            ("code", code),
            ("state", state),
        ];

        self.client.post_form("exchange_code", &url, &fields).await
    }

    /// Exchanges a short-lived token for a long-lived one.
    ///
    /// Returns `Ok(None)` when the provider answers successfully without a token.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Config`] if any credential is blank
    /// - [`InstagramError::InvalidArgument`] if `access_token` is blank
    /// - [`InstagramError::Provider`] / [`InstagramError::Http`] on failure
    pub async fn exchange_for_long_lived_token(
        &self,
        access_token: &str,
    ) -> Result<Option<LongLivedToken>, InstagramError> {
        let credentials = self.config.credentials();
        credentials.validate()?;
        require_argument(access_token, "access_token")?;

        let url = format!(
            "{}?grant_type=ig_exchange_token&client_secret={}&access_token={}",
            self.config.graph_host().join(EXCHANGE_PATH),
            urlencoding::encode(credentials.client_secret.as_ref()),
            urlencoding::encode(access_token),
        );

        let token: Option<LongLivedToken> = self
            .client
            .get_json("exchange_for_long_lived_token", &url)
            .await?;
        Ok(token.filter(LongLivedToken::is_issued))
    }

    /// Refreshes a long-lived token, extending its lifetime.
    ///
    /// Returns `Ok(None)` when the provider answers successfully without a token.
    ///
    /// # Errors
    ///
    /// Same as [`AuthSession::exchange_for_long_lived_token`].
    pub async fn refresh_long_lived_token(
        &self,
        access_token: &str,
    ) -> Result<Option<LongLivedToken>, InstagramError> {
        self.config.credentials().validate()?;
        require_argument(access_token, "access_token")?;

        let url = format!(
            "{}?grant_type=ig_refresh_token&access_token={}",
            self.config.graph_host().join(REFRESH_PATH),
            urlencoding::encode(access_token),
        );

        let token: Option<LongLivedToken> = self
            .client
            .get_json("refresh_long_lived_token", &url)
            .await?;
        Ok(token.filter(LongLivedToken::is_issued))
    }

    /// Returns a session carrying a long-lived token for the same user.
    ///
    /// If the provider issues no token, an unchanged copy of `session` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Same as [`AuthSession::exchange_for_long_lived_token`].
    pub async fn escalate_to_long_lived(&self, session: &Session) -> Result<Session, InstagramError> {
        let token = self
            .exchange_for_long_lived_token(&session.access_token)
            .await?;
        Ok(Self::apply_token(session, token, "escalate_to_long_lived"))
    }

    /// Returns a session carrying a refreshed long-lived token.
    ///
    /// If the provider issues no token, an unchanged copy of `session` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Same as [`AuthSession::refresh_long_lived_token`].
    pub async fn refresh_long_lived(&self, session: &Session) -> Result<Session, InstagramError> {
        let token = self.refresh_long_lived_token(&session.access_token).await?;
        Ok(Self::apply_token(session, token, "refresh_long_lived"))
    }

    fn apply_token(session: &Session, token: Option<LongLivedToken>, operation: &str) -> Session {
        match token {
            Some(token) => session.with_access_token(token.access_token),
            None => {
                tracing::warn!(
                    operation,
                    user_id = %session.user.id,
                    "No long-lived token issued, session left unchanged"
                );
                session.clone()
            }
        }
    }

    /// Fetches the profile of the session's user.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::InvalidArgument`] if the access token or user id is
    ///   blank; no request is sent
    /// - [`InstagramError::Provider`] / [`InstagramError::Http`] on failure
    pub async fn fetch_user(&self, session: &Session) -> Result<UserProfile, InstagramError> {
        self.fetch_user_by_token(&session.access_token, Some(&session.user.id))
            .await
    }

    /// Fetches a user profile with `access_token`.
    ///
    /// `user_id` defaults to [`CURRENT_USER`].
    ///
    /// # Errors
    ///
    /// Same as [`AuthSession::fetch_user`].
    pub async fn fetch_user_by_token(
        &self,
        access_token: &str,
        user_id: Option<&str>,
    ) -> Result<UserProfile, InstagramError> {
        self.config.credentials().validate()?;
        require_argument(access_token, "access_token")?;
        let user_id = user_id.unwrap_or(CURRENT_USER);
        require_argument(user_id, "user_id")?;

        let url = format!(
            "{}?fields={}&access_token={}",
            self.config.graph_host().join(&urlencoding::encode(user_id)),
            PROFILE_FIELDS,
            urlencoding::encode(access_token),
        );

        self.client.get_json("fetch_user", &url).await
    }
}
