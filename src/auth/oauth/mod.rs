//! OAuth authorization-code flow for Instagram Basic Display.
//!
//! # Overview
//!
//! - [`AuthSession`]: authorize URL, code exchange, token escalation and
//!   refresh, profile lookup
//! - [`AuthorizationRequest`]: the opaque `state` parameter
//! - [`BeginAuthResult`]: authorize URL plus the state to keep
//!
//! # Flow
//!
//! 1. Call [`AuthSession::begin_auth`] (or [`AuthSession::build_authorize_url`]
//!    with your own state) and redirect the user
//! 2. The provider redirects back with `code` and `state`
//! 3. Call [`AuthSession::authenticate`] to obtain a [`Session`](crate::Session)
//! 4. Persist the session and refresh it with [`AuthSession::refresh_long_lived`]
//!    before it expires

mod auth_session;
mod authorize;
mod state;

pub use auth_session::{AuthSession, CURRENT_USER};
pub use authorize::{BeginAuthResult, SCOPES};
pub use state::AuthorizationRequest;
