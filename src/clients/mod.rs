//! HTTP client layer for the Instagram endpoints.
//!
//! # Overview
//!
//! - [`ApiClient`]: async JSON GET / form POST client
//! - [`classify`]: turns a provider error body into a [`ProviderFailure`]
//! - [`ProviderErrorKind`]: the three provider failure categories
//! - [`HttpError`]: transport and decoding failures
//!
//! # Error Flow
//!
//! A non-success response is always classified before the body is decoded
//! into the expected type:
//!
//! - a recognized error envelope becomes [`InstagramError::Provider`](crate::InstagramError::Provider)
//! - any other body becomes [`HttpError::UnparseableErrorBody`]
//!
//! The client never retries. Timeouts are configured through
//! [`InstagramConfigBuilder::timeout`](crate::InstagramConfigBuilder::timeout).

mod api_client;
mod errors;
pub(crate) mod lenient_json;
mod provider_error;

pub use api_client::ApiClient;
pub use errors::HttpError;
pub use provider_error::{classify, ProviderErrorKind, ProviderFailure};
