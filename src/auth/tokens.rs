//! Access tokens issued by the provider.
//!
//! - [`ShortLivedToken`]: returned by the authorization-code exchange, valid
//!   for about an hour
//! - [`LongLivedToken`]: returned by the exchange and refresh endpoints, valid
//!   for about 60 days
//!
//! Lifetimes are informational; the client never enforces them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::lenient_json::{null_as_default, string_or_number};

/// Token returned by the authorization-code exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLivedToken {
    /// The short-lived access token.
    pub access_token: String,

    /// Id of the user who granted access. Sent as a JSON number.
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
}

/// Token returned by the long-lived exchange and refresh endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongLivedToken {
    /// The long-lived access token. Empty when the provider issued none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_token: String,

    /// The token type, usually `bearer`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_type: String,

    /// Seconds until the token expires.
    #[serde(default, deserialize_with = "null_as_default")]
    pub expires_in: i64,
}

impl LongLivedToken {
    /// Returns `true` if the provider actually issued a token.
    #[must_use]
    pub fn is_issued(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    /// Returns the expiry instant for a token received at `issued_at`.
    #[must_use]
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::seconds(self.expires_in)
    }
}
