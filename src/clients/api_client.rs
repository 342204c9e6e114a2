//! JSON client for the Instagram endpoints.
//!
//! [`ApiClient`] sends GET and form-encoded POST requests, classifies every
//! non-success body before any deserialization into the target type, and
//! decodes success bodies leniently. Each failure is logged exactly once here
//! and then propagated unchanged.

use serde::de::DeserializeOwned;

use crate::clients::errors::HttpError;
use crate::clients::lenient_json;
use crate::clients::provider_error::classify;
use crate::config::InstagramConfig;
use crate::error::InstagramError;

/// Query parameters whose values are masked in logs and error messages.
const REDACTED_PARAMS: [&str; 2] = ["access_token", "client_secret"];

/// Async JSON client for the Instagram OAuth and Graph endpoints.
///
/// # Thread Safety
///
/// `ApiClient` is `Clone`, `Send`, and `Sync`. Clones share the underlying
/// connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use instagram_basic_display::clients::ApiClient;
///
/// let client = ApiClient::new(&config)?;
/// let profile: UserProfile = client
///     .get_json("fetch_user", "https://graph.instagram.com/me?fields=id,username&access_token=...")
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    user_agent: String,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a client using the configured timeout and the credentials'
    /// name as `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialized.
    pub fn new(config: &InstagramConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            user_agent: config.credentials().name.clone(),
        })
    }

    /// Wraps an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// Returns the `User-Agent` sent on GET requests.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sends a GET request and decodes the JSON response into `T`.
    ///
    /// `operation` names the calling operation in log events.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Provider`] for a classified provider error body
    /// - [`InstagramError::Http`] for transport, decode or unrecognized error bodies
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: &str,
    ) -> Result<T, InstagramError> {
        tracing::debug!(operation, url = %redact_url(url), "GET");

        let result = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await;

        Self::handle_response(operation, "GET", url, result).await
    }

    /// Sends a form-encoded POST request and decodes the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<T, InstagramError> {
        tracing::debug!(operation, url = %redact_url(url), "POST");

        let result = self.client.post(url).form(fields).send().await;

        Self::handle_response(operation, "POST", url, result).await
    }

    async fn handle_response<T: DeserializeOwned>(
        operation: &str,
        method: &str,
        url: &str,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, InstagramError> {
        let redacted = redact_url(url);

        // reqwest errors embed the full URL, secrets included
        let response = result.map_err(|e| {
            let e = e.without_url();
            tracing::error!(operation, method, url = %redacted, error = %e, "Instagram request failed");
            HttpError::Network(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!(
                operation,
                method,
                url = %redacted,
                status = status.as_u16(),
                error = %e,
                "Failed to read Instagram response body"
            );
            HttpError::Network(e)
        })?;

        if status.is_success() {
            return lenient_json::from_str(&body).map_err(|source| {
                tracing::error!(
                    operation,
                    method,
                    url = %redacted,
                    status = status.as_u16(),
                    error = %source,
                    "Failed to decode Instagram response"
                );
                InstagramError::from(HttpError::Decode {
                    url: redacted.clone(),
                    source,
                })
            });
        }

        match classify(status.as_u16(), &body) {
            Ok(failure) => {
                tracing::error!(
                    operation,
                    method,
                    url = %redacted,
                    status = failure.status,
                    kind = %failure.kind,
                    error_type = ?failure.error_type,
                    code = ?failure.code,
                    subcode = ?failure.subcode,
                    trace_id = ?failure.trace_id,
                    "Instagram API error: {}",
                    failure.message
                );
                Err(failure.into())
            }
            Err(source) => {
                tracing::error!(
                    operation,
                    method,
                    url = %redacted,
                    status = status.as_u16(),
                    error = %source,
                    "Unrecognized Instagram error body"
                );
                Err(HttpError::UnparseableErrorBody {
                    url: redacted,
                    status: status.as_u16(),
                    source,
                }
                .into())
            }
        }
    }
}

/// Masks the values of secret query parameters in `url`.
pub(crate) fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let redacted: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if REDACTED_PARAMS.contains(&key) => format!("{key}=*****"),
            _ => pair.to_string(),
        })
        .collect();

    format!("{base}?{}", redacted.join("&"))
}
