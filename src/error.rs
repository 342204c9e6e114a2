//! Error types for the Instagram Basic Display client.
//!
//! This module contains the configuration error type and the crate-wide
//! [`InstagramError`] returned by every public operation.
//!
//! # Error Handling
//!
//! Failures fall into four groups:
//!
//! - [`InstagramError::Config`]: credentials or configuration are missing or
//!   invalid. Raised before any network call is attempted.
//! - [`InstagramError::InvalidArgument`]: the caller passed a blank value such
//!   as an access token, user id or media id.
//! - [`InstagramError::Provider`]: the provider answered with a structured
//!   error body. Switch on [`ProviderFailure::kind`] to tell OAuth problems
//!   from request problems.
//! - [`InstagramError::Http`]: the call failed below the provider's error
//!   contract (network, timeout, undecodable body).
//!
//! # Example
//!
//! ```rust
//! use instagram_basic_display::{ConfigError, Credentials};
//!
//! let credentials = Credentials::new("My App", "", "secret", "https://example.com/auth");
//! assert!(matches!(
//!     credentials.validate(),
//!     Err(ConfigError::MissingCredential { field: "client_id" })
//! ));
//! ```

use thiserror::Error;

use crate::clients::{HttpError, ProviderErrorKind, ProviderFailure};

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message. These errors are
/// fatal and never retryable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A credential field is missing or blank.
    #[error("The {field} is either missing or empty. Please check the Instagram credentials in your configuration.")]
    MissingCredential {
        /// The name of the blank credential field.
        field: &'static str,
    },

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://graph.instagram.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Unified error type for every public operation of the client.
///
/// The client never swallows a failure into a default value: anything that
/// goes wrong is logged once at the HTTP boundary and surfaced here.
///
/// # Example
///
/// ```rust,ignore
/// use instagram_basic_display::InstagramError;
///
/// match auth.refresh_long_lived(&session).await {
///     Ok(session) => store(session),
///     Err(err) if err.requires_reauthentication() => redirect_to_login(),
///     Err(InstagramError::Provider(failure)) => show(failure.message),
///     Err(other) => return Err(other.into()),
/// }
/// ```
#[derive(Debug, Error)]
pub enum InstagramError {
    /// The credentials or configuration are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required argument was empty or whitespace.
    #[error("Argument '{field}' cannot be empty.")]
    InvalidArgument {
        /// The name of the offending argument.
        field: &'static str,
    },

    /// The provider returned a structured error body.
    #[error(transparent)]
    Provider(#[from] ProviderFailure),

    /// The call failed at the transport or decoding level.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl InstagramError {
    /// Returns the classified provider failure, if this is one.
    #[must_use]
    pub const fn provider_failure(&self) -> Option<&ProviderFailure> {
        match self {
            Self::Provider(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns `true` when the provider rejected the OAuth session and the
    /// user has to go through the authorization flow again.
    #[must_use]
    pub fn requires_reauthentication(&self) -> bool {
        self.provider_failure()
            .is_some_and(|failure| failure.kind == ProviderErrorKind::OAuth)
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigError>();
    assert_send_sync::<InstagramError>();
};

/// Returns `Err(InvalidArgument)` when `value` is empty or whitespace.
pub(crate) fn require_argument(value: &str, field: &'static str) -> Result<(), InstagramError> {
    if value.trim().is_empty() {
        return Err(InstagramError::InvalidArgument { field });
    }
    Ok(())
}
