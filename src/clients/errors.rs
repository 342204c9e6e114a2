//! HTTP-level error types.
//!
//! [`HttpError`] covers every failure that happens below the provider's error
//! contract: the request never produced a response, a success body could not
//! be decoded, or an error body did not match the provider's error shape.
//! Structured provider errors are reported as
//! [`ProviderFailure`](crate::clients::ProviderFailure) instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use instagram_basic_display::{HttpError, InstagramError};
//!
//! match pager.fetch_page(&cursor).await {
//!     Err(InstagramError::Http(HttpError::Network(e))) if e.is_timeout() => retry_later(),
//!     Err(InstagramError::Http(HttpError::Decode { url, .. })) => report(url),
//!     other => handle(other),
//! }
//! ```

use thiserror::Error;

/// Unified error type for transport and decoding failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or connection error, including timeouts and TLS failures.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response body could not be decoded into the expected type.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// The redacted URL of the request.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A non-success response body did not match the provider's error shape.
    #[error("Unrecognized error body from {url} (status {status}): {source}")]
    UnparseableErrorBody {
        /// The redacted URL of the request.
        url: String,
        /// The HTTP status code of the response.
        status: u16,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode { .. } => None,
            Self::UnparseableErrorBody { status, .. } => Some(*status),
        }
    }
}
