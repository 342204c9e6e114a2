//! The authenticated session.
//!
//! A [`Session`] is produced by [`AuthSession`](crate::AuthSession) and owned
//! by the caller. Persist it wherever suits the application; it serializes
//! with serde. Escalation and refresh return a new `Session` and leave the
//! old one untouched.

use serde::{Deserialize, Serialize};

use crate::auth::UserProfile;

/// An access token together with the profile of the user it belongs to.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use instagram_basic_display::{AccountType, Session, UserProfile};
///
/// let session = Session::new(
///     "access-token",
///     UserProfile {
///         id: "123".to_string(),
///         account_type: AccountType::Personal,
///         media_count: 3,
///         username: "someone".to_string(),
///     },
/// );
///
/// let stored = serde_json::to_string(&session).unwrap();
/// let restored: Session = serde_json::from_str(&stored).unwrap();
/// assert_eq!(restored, session);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The access token used for Graph calls.
    pub access_token: String,

    /// The authenticated user.
    pub user: UserProfile,
}

impl Session {
    /// Creates a new session.
    #[must_use]
    pub fn new(access_token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            access_token: access_token.into(),
            user,
        }
    }

    /// Returns a copy of this session carrying a different access token.
    #[must_use]
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user: self.user.clone(),
        }
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
