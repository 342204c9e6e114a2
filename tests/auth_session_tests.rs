//! Integration tests for the OAuth flow.
//!
//! These tests run [`AuthSession`] against a mock provider and verify request
//! shapes, step ordering, token escalation and refresh, and that invalid input
//! never reaches the network.

use instagram_basic_display::{
    AccountType, AuthSession, ConfigError, Credentials, HostUrl, InstagramConfig, InstagramError,
    ProviderErrorKind, Session, UserProfile,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APP_NAME: &str = "Unit Testing Instagram Basic Display API";

fn create_test_credentials() -> Credentials {
    Credentials::new(
        APP_NAME,
        "123",
        "a4b4c4d4e4",
        "http://www.localhost:5000/auth/oauth",
    )
}

/// Creates a configuration pointing both hosts at the mock server
fn create_test_config(server: &MockServer, credentials: Credentials) -> InstagramConfig {
    let host = HostUrl::new(server.uri()).unwrap();
    InstagramConfig::builder()
        .credentials(credentials)
        .auth_host(host.clone())
        .graph_host(host)
        .build()
        .unwrap()
}

fn create_test_auth(server: &MockServer) -> AuthSession {
    AuthSession::new(create_test_config(server, create_test_credentials())).unwrap()
}

fn profile_json() -> serde_json::Value {
    json!({
        "account_type": "BUSINESS",
        "id": "123",
        "media_count": 116,
        "username": "solrevdev"
    })
}

fn existing_session(access_token: &str) -> Session {
    Session::new(
        access_token,
        UserProfile {
            id: "123".to_string(),
            account_type: AccountType::Business,
            media_count: 116,
            username: "solrevdev".to_string(),
        },
    )
}

/// Fails the test on drop if any request reaches the server
async fn forbid_any_request(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_authenticate_exchanges_code_then_fetches_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .and(body_string_contains("client_id=123"))
        .and(body_string_contains("client_secret=a4b4c4d4e4"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains("state=xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "123",
            "user_id": 123
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/123"))
        .and(query_param("fields", "account_type,id,media_count,username"))
        .and(query_param("access_token", "123"))
        .and(header("User-Agent", APP_NAME))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let session = auth.authenticate("auth-code", "xyz", false).await.unwrap();

    assert_eq!(session.access_token, "123");
    assert_eq!(session.user.id, "123");
    assert_eq!(session.user.account_type, AccountType::Business);
    assert_eq!(session.user.media_count, 116);
    assert_eq!(session.user.username, "solrevdev");

    // Token exchange must complete before the profile request is issued
    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/oauth/access_token", "/123"]);
}

#[tokio::test]
async fn test_authenticate_with_escalation_uses_long_lived_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "short-lived",
            "user_id": 123
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/access_token"))
        .and(query_param("grant_type", "ig_exchange_token"))
        .and(query_param("client_secret", "a4b4c4d4e4"))
        .and(query_param("access_token", "short-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "long-lived",
            "token_type": "bearer",
            "expires_in": 5_184_000
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/123"))
        .and(query_param("access_token", "long-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let session = auth.authenticate("auth-code", "", true).await.unwrap();

    assert_eq!(session.access_token, "long-lived");
    assert_eq!(session.user.username, "solrevdev");

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/oauth/access_token", "/access_token", "/123"]);
}

#[tokio::test]
async fn test_authenticate_keeps_short_lived_token_when_none_issued() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "short-lived",
            "user_id": "123"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/123"))
        .and(query_param("access_token", "short-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let session = auth.authenticate("auth-code", "", true).await.unwrap();

    assert_eq!(session.access_token, "short-lived");
}

#[tokio::test]
async fn test_authenticate_aborts_when_code_exchange_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "Matching code was not found or was already used",
                "type": "OAuthException",
                "code": 400,
                "fbtrace_id": "A1b2C3"
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(0)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let error = auth.authenticate("used-code", "", true).await.unwrap_err();

    assert!(error.requires_reauthentication());
    let failure = error.provider_failure().unwrap();
    assert_eq!(failure.kind, ProviderErrorKind::OAuth);
    assert_eq!(failure.status, 400);
    assert_eq!(failure.code, Some(400));
    assert_eq!(failure.trace_id.as_deref(), Some("A1b2C3"));
}

#[tokio::test]
async fn test_authenticate_aborts_when_profile_fetch_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "123",
            "user_id": 123
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/123"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "Unsupported get request.",
                "type": "IGApiException",
                "code": 100,
                "error_subcode": 33
            }
        })))
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let error = auth.authenticate("auth-code", "", false).await.unwrap_err();

    let failure = error.provider_failure().unwrap();
    assert_eq!(failure.kind, ProviderErrorKind::Api);
    assert_eq!(failure.subcode, Some(33));
    assert!(!error.requires_reauthentication());
}

#[tokio::test]
async fn test_escalate_returns_new_session_with_same_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access_token"))
        .and(query_param("access_token", "short-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "long-lived",
            "token_type": "bearer",
            "expires_in": 5_184_000
        })))
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let original = existing_session("short-lived");
    let escalated = auth.escalate_to_long_lived(&original).await.unwrap();

    assert_eq!(escalated.access_token, "long-lived");
    assert_eq!(escalated.user, original.user);
    assert_eq!(original.access_token, "short-lived");
}

#[tokio::test]
async fn test_escalate_without_issued_token_returns_original_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let original = existing_session("short-lived");
    let result = auth.escalate_to_long_lived(&original).await.unwrap();

    assert_eq!(result, original);
}

#[tokio::test]
async fn test_refresh_returns_new_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/refresh_access_token"))
        .and(query_param("grant_type", "ig_refresh_token"))
        .and(query_param("access_token", "long-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "refreshed",
            "token_type": "bearer",
            "expires_in": 5_183_944
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let original = existing_session("long-lived");
    let refreshed = auth.refresh_long_lived(&original).await.unwrap();

    assert_eq!(refreshed.access_token, "refreshed");
    assert_eq!(refreshed.user, original.user);
    assert_eq!(original.access_token, "long-lived");
}

#[tokio::test]
async fn test_refresh_without_token_in_body_returns_original_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/refresh_access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let original = existing_session("long-lived");
    let result = auth.refresh_long_lived(&original).await.unwrap();

    assert_eq!(result, original);
}

#[tokio::test]
async fn test_escalate_with_null_token_returns_original_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": null,
            "token_type": "bearer",
            "expires_in": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let original = existing_session("short-lived");
    let result = auth.escalate_to_long_lived(&original).await.unwrap();

    assert_eq!(result, original);
}

#[tokio::test]
async fn test_refresh_with_null_fields_returns_original_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/refresh_access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": null,
            "token_type": null,
            "expires_in": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let original = existing_session("long-lived");
    let result = auth.refresh_long_lived(&original).await.unwrap();

    assert_eq!(result, original);
}

#[tokio::test]
async fn test_refresh_with_expired_token_requires_reauthentication() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/refresh_access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "Error validating access token: Session has expired",
                "type": "OAuthException",
                "code": 190
            }
        })))
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let error = auth
        .refresh_long_lived(&existing_session("expired"))
        .await
        .unwrap_err();

    assert!(error.requires_reauthentication());
}

#[tokio::test]
async fn test_fetch_user_by_token_defaults_to_me() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(query_param("access_token", "token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let user = auth.fetch_user_by_token("token", None).await.unwrap();

    assert_eq!(user.username, "solrevdev");
}

#[tokio::test]
async fn test_fetch_user_uses_session_user_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/123"))
        .and(query_param("access_token", "token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&server)
        .await;

    let auth = create_test_auth(&server);
    let user = auth.fetch_user(&existing_session("token")).await.unwrap();

    assert_eq!(user.id, "123");
}

#[tokio::test]
async fn test_blank_arguments_never_reach_the_network() {
    let server = MockServer::start().await;
    forbid_any_request(&server).await;

    let auth = create_test_auth(&server);

    let mut no_user = existing_session("token");
    no_user.user.id = "   ".to_string();

    assert!(matches!(
        auth.fetch_user(&no_user).await,
        Err(InstagramError::InvalidArgument { field: "user_id" })
    ));
    assert!(matches!(
        auth.fetch_user(&existing_session("")).await,
        Err(InstagramError::InvalidArgument {
            field: "access_token"
        })
    ));
    assert!(matches!(
        auth.escalate_to_long_lived(&existing_session(" ")).await,
        Err(InstagramError::InvalidArgument {
            field: "access_token"
        })
    ));
    assert!(matches!(
        auth.refresh_long_lived(&existing_session("")).await,
        Err(InstagramError::InvalidArgument {
            field: "access_token"
        })
    ));
}

#[tokio::test]
async fn test_blank_credentials_fail_before_any_request() {
    let server = MockServer::start().await;
    forbid_any_request(&server).await;

    let cases = [
        (Credentials::new(APP_NAME, "", "secret", "https://x.test/cb"), "client_id"),
        (Credentials::new(APP_NAME, "123", " ", "https://x.test/cb"), "client_secret"),
        (Credentials::new(APP_NAME, "123", "secret", ""), "redirect_url"),
        (Credentials::new("", "123", "secret", "https://x.test/cb"), "name"),
    ];

    for (credentials, expected) in cases {
        let auth = AuthSession::new(create_test_config(&server, credentials)).unwrap();

        let error = auth.authenticate("code", "", true).await.unwrap_err();
        match error {
            InstagramError::Config(ConfigError::MissingCredential { field }) => {
                assert_eq!(field, expected);
            }
            other => panic!("Expected MissingCredential, got: {other:?}"),
        }

        let session = existing_session("token");
        let results = [
            auth.escalate_to_long_lived(&session).await.map(drop),
            auth.refresh_long_lived(&session).await.map(drop),
            auth.fetch_user(&session).await.map(drop),
            auth.fetch_user_by_token("token", None).await.map(drop),
            auth.begin_auth().map(drop),
            auth.build_authorize_url(None).map(drop),
        ];
        for result in results {
            match result {
                Err(InstagramError::Config(ConfigError::MissingCredential { field })) => {
                    assert_eq!(field, expected);
                }
                other => panic!("Expected MissingCredential for {expected}, got: {other:?}"),
            }
        }
    }
}

#[tokio::test]
async fn test_authorize_url_targets_configured_host() {
    let server = MockServer::start().await;
    let auth = create_test_auth(&server);

    let url = auth.build_authorize_url(Some("xyz")).unwrap();

    assert_eq!(
        url,
        format!(
            "{}/oauth/authorize?client_id=123&redirect_uri=http%3A%2F%2Fwww.localhost%3A5000%2Fauth%2Foauth&scope=user_profile,user_media&response_type=code&state=xyz",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_connection_failure_does_not_leak_secrets() {
    // Nothing listens on port 1
    let host = HostUrl::new("http://127.0.0.1:1").unwrap();
    let config = InstagramConfig::builder()
        .credentials(Credentials::new(
            APP_NAME,
            "123",
            "app-secret-value",
            "https://x.test/cb",
        ))
        .auth_host(host.clone())
        .graph_host(host)
        .build()
        .unwrap();
    let auth = AuthSession::new(config).unwrap();

    let escalate_error = auth
        .escalate_to_long_lived(&existing_session("short-lived-token"))
        .await
        .unwrap_err();
    let profile_error = auth
        .fetch_user_by_token("profile-token", None)
        .await
        .unwrap_err();

    for (error, token) in [
        (escalate_error, "short-lived-token"),
        (profile_error, "profile-token"),
    ] {
        assert!(matches!(
            error,
            InstagramError::Http(instagram_basic_display::HttpError::Network(_))
        ));
        for rendered in [error.to_string(), format!("{error:?}")] {
            assert!(!rendered.contains(token), "token leaked: {rendered}");
            assert!(
                !rendered.contains("app-secret-value"),
                "secret leaked: {rendered}"
            );
        }
    }
}
