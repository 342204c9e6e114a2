//! The authenticated Instagram user.

use serde::{Deserialize, Serialize};

use crate::clients::lenient_json::string_or_number;

/// The kind of Instagram account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// A business account.
    Business,
    /// A creator account.
    MediaCreator,
    /// A personal account.
    Personal,
    /// An account type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Profile of the user who granted access.
///
/// # Example
///
/// ```rust
/// use instagram_basic_display::{AccountType, UserProfile};
///
/// let user: UserProfile = serde_json::from_str(
///     r#"{"account_type":"BUSINESS","id":"123","media_count":116,"username":"solrevdev"}"#,
/// ).unwrap();
///
/// assert_eq!(user.account_type, AccountType::Business);
/// assert_eq!(user.media_count, 116);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user id.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// The account type.
    pub account_type: AccountType,

    /// Number of media items on the account.
    #[serde(default)]
    pub media_count: u64,

    /// The user's handle.
    pub username: String,
}
