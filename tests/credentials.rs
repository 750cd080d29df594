//! Credential loading and token refresh against a mock token endpoint.

use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ytmusic_mcp::auth::{CredentialSource, Credentials, TokenBundle};
use ytmusic_mcp::config::AuthSettings;
use ytmusic_mcp::music::{MusicClient, SearchFilter};
use ytmusic_mcp::youtube::HttpYoutubeApi;
use ytmusic_mcp::YtMusicError;

fn auth_settings() -> AuthSettings {
    AuthSettings {
        token_b64_env: "YTMUSIC_MCP_TEST_NEVER_SET_B64".to_string(),
        token_json_env: "YTMUSIC_MCP_TEST_NEVER_SET_JSON".to_string(),
        ..AuthSettings::default()
    }
}

fn write_expired_bundle(file: &Path, token_uri: &str) {
    let bundle = json!({
        "token": "stale",
        "refresh_token": "1//refresh",
        "token_uri": token_uri,
        "client_id": "id.apps.googleusercontent.com",
        "client_secret": "secret",
        "scopes": ["https://www.googleapis.com/auth/youtube"],
        "expiry": "2020-01-01T00:00:00Z"
    });
    std::fs::write(file, bundle.to_string()).unwrap();
}

#[tokio::test]
async fn test_expired_file_token_is_refreshed_and_saved() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_file = dir.path().join("token.json");
    write_expired_bundle(&token_file, &format!("{}/token", server.uri()));

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=1%2F%2Frefresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let credentials = Credentials::load(&auth_settings(), &token_file).unwrap();
    assert_eq!(credentials.source(), &CredentialSource::File(token_file.clone()));

    let api = HttpYoutubeApi::new(&format!("{}/youtube/v3", server.uri()), credentials, None).unwrap();
    let client = MusicClient::new(Arc::new(api));

    // The second call reuses the refreshed token.
    client.search("a", 1, SearchFilter::Songs).await.unwrap();
    client.search("b", 1, SearchFilter::Songs).await.unwrap();

    let saved = TokenBundle::parse(&std::fs::read_to_string(&token_file).unwrap()).unwrap();
    assert_eq!(saved.token.as_deref(), Some("fresh"));
    assert_eq!(saved.refresh_token.as_deref(), Some("1//refresh"));
    assert!(saved.expiry.is_some());
}

#[tokio::test]
async fn test_rejected_refresh_is_credential_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_file = dir.path().join("token.json");
    write_expired_bundle(&token_file, &format!("{}/token", server.uri()));

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Token has been expired or revoked."
        })))
        .mount(&server)
        .await;

    let mut credentials = Credentials::load(&auth_settings(), &token_file).unwrap();
    let err = credentials
        .ensure_fresh(&reqwest::Client::new())
        .await
        .unwrap_err();

    match err {
        YtMusicError::Credential(message) => assert!(message.contains("invalid_grant")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_env_bundle_is_not_written_anywhere() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_file = dir.path().join("token.json");

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let raw = json!({
        "refresh_token": "1//refresh",
        "token_uri": format!("{}/token", server.uri()),
        "client_id": "id",
        "client_secret": "secret"
    })
    .to_string();
    let settings = auth_settings();
    let json_var = settings.token_json_env.clone();
    let mut credentials = Credentials::load_with(&settings, &token_file, |var| {
        (var == json_var).then(|| raw.clone())
    })
    .unwrap();

    assert!(credentials.ensure_fresh(&reqwest::Client::new()).await.unwrap());
    assert_eq!(credentials.access_token().unwrap(), "fresh");
    assert!(!token_file.exists());
}

#[tokio::test]
async fn test_failed_write_back_keeps_refreshed_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    // The parent directory does not exist, so saving the bundle fails.
    let token_file = dir.path().join("missing").join("token.json");

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bundle = TokenBundle::parse(
        &json!({
            "token": "stale",
            "refresh_token": "1//refresh",
            "token_uri": format!("{}/token", server.uri()),
            "client_id": "id",
            "client_secret": "secret",
            "expiry": "2020-01-01T00:00:00Z"
        })
        .to_string(),
    )
    .unwrap();
    let mut credentials = Credentials::new(bundle, CredentialSource::File(token_file.clone()));

    assert!(credentials.ensure_fresh(&reqwest::Client::new()).await.unwrap());
    assert_eq!(credentials.access_token().unwrap(), "fresh");
    assert!(!token_file.exists());
}
