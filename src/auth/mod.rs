//! Authentication types for the Instagram Basic Display client.
//!
//! # Overview
//!
//! - [`oauth`]: the authorization-code flow ([`AuthSession`])
//! - [`Session`]: an access token plus the user it belongs to
//! - [`UserProfile`] / [`AccountType`]: the authenticated user
//! - [`ShortLivedToken`] / [`LongLivedToken`]: tokens issued by the provider

pub mod oauth;
mod session;
mod tokens;
mod user;

pub use oauth::{AuthSession, AuthorizationRequest, BeginAuthResult};
pub use session::Session;
pub use tokens::{LongLivedToken, ShortLivedToken};
pub use user::{AccountType, UserProfile};
