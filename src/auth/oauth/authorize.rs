//! Authorization URL construction.
//!
//! The user's browser is sent to the provider's authorize endpoint with the
//! app's client id, redirect URL, requested scopes and an opaque `state`.
//! Parameters are emitted in a fixed order:
//!
//! ```text
//! {auth_host}/oauth/authorize?client_id=..&redirect_uri=..&scope=user_profile,user_media&response_type=code&state=..
//! ```
//!
//! `redirect_uri` and `state` are percent-encoded. `client_id` and the scope
//! list are emitted verbatim.

use crate::auth::oauth::AuthorizationRequest;
use crate::config::InstagramConfig;
use crate::error::ConfigError;

const AUTHORIZE_PATH: &str = "oauth/authorize";

/// Scopes requested from the user.
pub const SCOPES: &str = "user_profile,user_media";

/// Result of starting an authorization attempt.
///
/// The `state` must be kept by the application (session, cookie) and
/// compared with the value echoed on the redirect using
/// [`AuthorizationRequest::matches`].
///
/// # Example
///
/// ```rust,ignore
/// let result = auth.begin_auth()?;
///
/// cookies.set("oauth_state", result.state.as_ref());
/// return Redirect::to(&result.auth_url);
/// ```
#[derive(Clone, Debug)]
pub struct BeginAuthResult {
    /// The authorize URL to redirect the user to.
    pub auth_url: String,

    /// The state sent with this attempt.
    pub state: AuthorizationRequest,
}

/// Builds the authorize URL for `state`.
pub(crate) fn build_authorize_url(
    config: &InstagramConfig,
    state: &str,
) -> Result<String, ConfigError> {
    let credentials = config.credentials();
    credentials.validate()?;

    Ok(format!(
        "{}?client_id={}&redirect_uri={}&scope={}&response_type=code&state={}",
        config.auth_host().join(AUTHORIZE_PATH),
        credentials.client_id,
        urlencoding::encode(&credentials.redirect_url),
        SCOPES,
        urlencoding::encode(state),
    ))
}
