//! Classification of provider error bodies.
//!
//! Every non-success response from Instagram carries a body of the form
//!
//! ```json
//! {"error": {"message": "...", "type": "OAuthException", "code": 190,
//!            "error_subcode": 460, "fbtrace_id": "..."}}
//! ```
//!
//! [`classify`] turns that body into a [`ProviderFailure`] tagged with a
//! [`ProviderErrorKind`]:
//!
//! 1. `type` equal (ignoring case) to `OAuthException` gives [`ProviderErrorKind::OAuth`]
//! 2. `type` equal (ignoring case) to `IGApiException` gives [`ProviderErrorKind::Api`]
//! 3. anything else, including a missing `type`, gives [`ProviderErrorKind::Other`]
//!
//! # Example
//!
//! ```rust
//! use instagram_basic_display::clients::{classify, ProviderErrorKind};
//!
//! let body = r#"{"error": {"message": "Invalid OAuth access token.",
//!                          "type": "OAuthException", "code": 190}}"#;
//! let failure = classify(400, body).unwrap();
//!
//! assert_eq!(failure.kind, ProviderErrorKind::OAuth);
//! assert_eq!(failure.code, Some(190));
//! ```

use std::fmt;

use serde::Deserialize;

use crate::clients::lenient_json;

const OAUTH_EXCEPTION: &str = "OAuthException";
const API_EXCEPTION: &str = "IGApiException";

/// The category of a provider failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// The access token or OAuth exchange was rejected (`OAuthException`).
    OAuth,
    /// The request itself was rejected (`IGApiException`).
    Api,
    /// Any other provider error.
    Other,
}

impl ProviderErrorKind {
    /// Maps the provider's `type` string onto a kind.
    #[must_use]
    pub fn from_error_type(error_type: Option<&str>) -> Self {
        match error_type {
            Some(t) if t.eq_ignore_ascii_case(OAUTH_EXCEPTION) => Self::OAuth,
            Some(t) if t.eq_ignore_ascii_case(API_EXCEPTION) => Self::Api,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OAuth => "oauth",
            Self::Api => "api",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// A structured error reported by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderFailure {
    /// The classified kind.
    pub kind: ProviderErrorKind,
    /// The HTTP status code of the response.
    pub status: u16,
    /// The provider's human-readable message.
    pub message: String,
    /// The provider's raw `type` string.
    pub error_type: Option<String>,
    /// The provider's numeric error code.
    pub code: Option<i64>,
    /// The provider's numeric error subcode.
    pub subcode: Option<i64>,
    /// The provider's trace id, useful in support requests.
    pub trace_id: Option<String>,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error_type, self.code) {
            (Some(error_type), Some(code)) => {
                write!(f, "({error_type} - #{code}) {}", self.message)
            }
            (Some(error_type), None) => write!(f, "({error_type}) {}", self.message),
            (None, Some(code)) => write!(f, "(#{code}) {}", self.message),
            (None, None) => write!(f, "Instagram API error (status {}): {}", self.status, self.message),
        }
    }
}

impl std::error::Error for ProviderFailure {}

/// Wire shape of a provider error response.
#[derive(Debug, Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    error_subcode: Option<i64>,
    #[serde(default)]
    fbtrace_id: Option<String>,
}

/// Classifies a non-success response body.
///
/// # Errors
///
/// Returns the JSON error when `body` is not a provider error envelope. The
/// caller reports it as
/// [`HttpError::UnparseableErrorBody`](crate::clients::HttpError::UnparseableErrorBody).
pub fn classify(status: u16, body: &str) -> Result<ProviderFailure, serde_json::Error> {
    let envelope: ProviderErrorEnvelope = lenient_json::from_str(body)?;
    let error = envelope.error;

    Ok(ProviderFailure {
        kind: ProviderErrorKind::from_error_type(error.error_type.as_deref()),
        status,
        message: error.message.unwrap_or_default(),
        error_type: error.error_type,
        code: error.code,
        subcode: error.error_subcode,
        trace_id: error.fbtrace_id,
    })
}
