//! Instagram app credentials.
//!
//! [`Credentials`] holds the four values registered for an Instagram Basic
//! Display app. They are loaded once at startup and read-only afterwards.

use std::env;

use serde::{Deserialize, Serialize};

use crate::config::ClientSecret;
use crate::error::ConfigError;

/// Environment variable holding the app name used as `User-Agent`.
pub const NAME_ENV_VAR: &str = "INSTAGRAM_NAME";
/// Environment variable holding the Instagram app id.
pub const CLIENT_ID_ENV_VAR: &str = "INSTAGRAM_CLIENT_ID";
/// Environment variable holding the Instagram app secret.
pub const CLIENT_SECRET_ENV_VAR: &str = "INSTAGRAM_CLIENT_SECRET";
/// Environment variable holding the OAuth redirect URL.
pub const REDIRECT_URL_ENV_VAR: &str = "INSTAGRAM_REDIRECT_URL";

/// Credentials of an Instagram Basic Display app.
///
/// Fields are not validated on construction. Every public operation calls
/// [`Credentials::validate`] first, so a blank field surfaces as
/// [`ConfigError::MissingCredential`] before any request is sent.
///
/// Credentials deserialize from either snake_case or PascalCase keys, so an
/// existing settings file can be read as-is:
///
/// ```rust
/// use instagram_basic_display::Credentials;
///
/// let credentials: Credentials = serde_json::from_str(r#"{
///     "Name": "My App",
///     "ClientId": "123",
///     "ClientSecret": "secret",
///     "RedirectUrl": "https://example.com/auth/oauth"
/// }"#).unwrap();
///
/// assert_eq!(credentials.client_id, "123");
/// assert!(credentials.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application name, sent as the `User-Agent` header.
    #[serde(default, alias = "Name")]
    pub name: String,

    /// The Instagram app id.
    #[serde(default, alias = "ClientId")]
    pub client_id: String,

    /// The Instagram app secret.
    #[serde(default, alias = "ClientSecret")]
    pub client_secret: ClientSecret,

    /// The OAuth redirect URL registered for the app.
    #[serde(default, alias = "RedirectUrl")]
    pub redirect_url: String,
}

impl Credentials {
    /// Creates credentials from their four components.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            client_id: client_id.into(),
            client_secret: ClientSecret::new(client_secret),
            redirect_url: redirect_url.into(),
        }
    }

    /// Reads credentials from the `INSTAGRAM_*` environment variables.
    ///
    /// Unset variables produce blank fields, which are reported by
    /// [`Credentials::validate`] on first use.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |key: &str| {
            env::var(key).unwrap_or_else(|_| {
                tracing::debug!("Environment variable {} is not set", key);
                String::new()
            })
        };

        Self::new(
            read(NAME_ENV_VAR),
            read(CLIENT_ID_ENV_VAR),
            read(CLIENT_SECRET_ENV_VAR),
            read(REDIRECT_URL_ENV_VAR),
        )
    }

    /// Checks that every field is present and not blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] naming the first blank field,
    /// checked in the order `client_id`, `client_secret`, `redirect_url`, `name`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::MissingCredential { field: "client_id" });
        }
        if self.client_secret.is_blank() {
            return Err(ConfigError::MissingCredential {
                field: "client_secret",
            });
        }
        if self.redirect_url.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                field: "redirect_url",
            });
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingCredential { field: "name" });
        }
        Ok(())
    }
}
