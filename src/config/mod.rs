//! Configuration types for the Instagram Basic Display client.
//!
//! # Overview
//!
//! - [`InstagramConfig`]: credentials, provider hosts and transport timeout
//! - [`InstagramConfigBuilder`]: a builder for constructing [`InstagramConfig`]
//! - [`Credentials`]: the app's name, id, secret and redirect URL
//! - [`ClientSecret`]: the app secret with masked debug output
//! - [`HostUrl`]: a validated provider host
//!
//! # Example
//!
//! ```rust
//! use instagram_basic_display::{Credentials, InstagramConfig};
//! use std::time::Duration;
//!
//! let config = InstagramConfig::builder()
//!     .credentials(Credentials::new("My App", "123", "secret", "https://example.com/auth"))
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.graph_host().as_ref(), "https://graph.instagram.com");
//! ```

mod credentials;
mod newtypes;

pub use credentials::{
    Credentials, CLIENT_ID_ENV_VAR, CLIENT_SECRET_ENV_VAR, NAME_ENV_VAR, REDIRECT_URL_ENV_VAR,
};
pub use newtypes::{ClientSecret, HostUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default host serving the OAuth authorize and token endpoints.
pub const DEFAULT_AUTH_HOST: &str = "https://api.instagram.com";

/// Default host serving the Graph endpoints (tokens, profile, media).
pub const DEFAULT_GRAPH_HOST: &str = "https://graph.instagram.com";

/// Configuration for the Instagram Basic Display client.
///
/// # Thread Safety
///
/// `InstagramConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct InstagramConfig {
    credentials: Credentials,
    auth_host: HostUrl,
    graph_host: HostUrl,
    timeout: Option<Duration>,
}

impl InstagramConfig {
    /// Creates a new builder for constructing an `InstagramConfig`.
    #[must_use]
    pub fn builder() -> InstagramConfigBuilder {
        InstagramConfigBuilder::new()
    }

    /// Creates a configuration with default hosts for the given credentials.
    ///
    /// # Errors
    ///
    /// Never fails with the default hosts; the `Result` mirrors
    /// [`InstagramConfigBuilder::build`].
    pub fn new(credentials: Credentials) -> Result<Self, ConfigError> {
        Self::builder().credentials(credentials).build()
    }

    /// Returns the app credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the OAuth host.
    #[must_use]
    pub const fn auth_host(&self) -> &HostUrl {
        &self.auth_host
    }

    /// Returns the Graph host.
    #[must_use]
    pub const fn graph_host(&self) -> &HostUrl {
        &self.graph_host
    }

    /// Returns the transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify InstagramConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InstagramConfig>();
};

/// Builder for constructing [`InstagramConfig`] instances.
///
/// # Defaults
///
/// - `auth_host`: `https://api.instagram.com`
/// - `graph_host`: `https://graph.instagram.com`
/// - `timeout`: `None` (the transport's default)
#[derive(Debug, Default)]
pub struct InstagramConfigBuilder {
    credentials: Option<Credentials>,
    auth_host: Option<HostUrl>,
    graph_host: Option<HostUrl>,
    timeout: Option<Duration>,
}

impl InstagramConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the app credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Overrides the OAuth host.
    #[must_use]
    pub fn auth_host(mut self, host: HostUrl) -> Self {
        self.auth_host = Some(host);
        self
    }

    /// Overrides the Graph host.
    #[must_use]
    pub fn graph_host(mut self, host: HostUrl) -> Self {
        self.graph_host = Some(host);
        self
    }

    /// Sets a total timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`InstagramConfig`].
    ///
    /// Credential fields are not checked here; they are validated at the
    /// start of every operation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `credentials` is not set.
    pub fn build(self) -> Result<InstagramConfig, ConfigError> {
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        let auth_host = match self.auth_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_AUTH_HOST)?,
        };
        let graph_host = match self.graph_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_GRAPH_HOST)?,
        };

        Ok(InstagramConfig {
            credentials,
            auth_host,
            graph_host,
            timeout: self.timeout,
        })
    }
}
