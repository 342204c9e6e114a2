//! The OAuth `state` parameter.
//!
//! The provider echoes `state` back untouched on the redirect. This module
//! provides [`AuthorizationRequest`] for generating, carrying and verifying it.
//!
//! # Formats
//!
//! - **Nonce**: [`AuthorizationRequest::new()`] generates a 15-character
//!   alphanumeric string.
//! - **With data**: [`AuthorizationRequest::with_data()`] embeds a nonce and
//!   caller data as base64-encoded JSON, e.g. a return URL.
//! - **Raw**: [`AuthorizationRequest::from_raw()`] wraps any caller string;
//!   the value is passed through opaquely.
//!
//! # Example
//!
//! ```rust
//! use instagram_basic_display::AuthorizationRequest;
//!
//! let request = AuthorizationRequest::new();
//! assert_eq!(request.as_ref().len(), 15);
//!
//! // On the redirect, compare the echoed value in constant time
//! let echoed = request.as_ref().to_string();
//! assert!(request.matches(&echoed));
//! ```

use base64::prelude::*;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// An opaque `state` value for one authorization attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationRequest {
    state: String,
}

#[derive(Serialize, Deserialize)]
struct EnvelopedState<T> {
    nonce: String,
    data: T,
}

// Verify AuthorizationRequest is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthorizationRequest>();
};

impl AuthorizationRequest {
    const NONCE_LENGTH: usize = 15;

    fn nonce() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Generates a fresh random nonce.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Self::nonce(),
        }
    }

    /// Generates a state carrying `data` alongside a fresh nonce.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `data` cannot be encoded as JSON.
    ///
    /// # Example
    ///
    /// ```rust
    /// use instagram_basic_display::AuthorizationRequest;
    ///
    /// let request = AuthorizationRequest::with_data(&"/gallery").unwrap();
    /// let return_url: Option<String> = request.extract_data();
    /// assert_eq!(return_url.as_deref(), Some("/gallery"));
    /// ```
    pub fn with_data<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_string(&EnvelopedState {
            nonce: Self::nonce(),
            data,
        })?;

        Ok(Self {
            state: BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes()),
        })
    }

    /// Wraps a caller-supplied state string as-is.
    #[must_use]
    pub fn from_raw(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
        }
    }

    /// Decodes the data embedded by [`AuthorizationRequest::with_data`].
    ///
    /// Returns `None` for nonce or raw states, or when the data does not
    /// match `T`.
    #[must_use]
    pub fn extract_data<T: DeserializeOwned>(&self) -> Option<T> {
        let decoded = BASE64_URL_SAFE_NO_PAD.decode(self.state.as_bytes()).ok()?;
        let envelope: EnvelopedState<T> = serde_json::from_slice(&decoded).ok()?;
        Some(envelope.data)
    }

    /// Compares the value echoed on the redirect in constant time.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        self.state.as_bytes().ct_eq(received.as_bytes()).into()
    }
}

impl Default for AuthorizationRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for AuthorizationRequest {
    fn as_ref(&self) -> &str {
        &self.state
    }
}

impl fmt::Display for AuthorizationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.state)
    }
}
