//! Integration tests for the OAuth helpers
//!
//! - App token, code exchange and token extension send app credentials
//! - debug_token decodes its `data` object
//! - None of them need a user token on the client

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fbmarketing_graph::GraphError;

use crate::common::{self, api_path, APP_ID, APP_SECRET};

fn token_body(token: &str, expires_in: Option<u64>) -> ResponseTemplate {
    let mut body = json!({"access_token": token, "token_type": "bearer"});
    if let Some(expires_in) = expires_in {
        body["expires_in"] = json!(expires_in);
    }
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn test_get_app_token() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(method("GET"))
        .and(path(api_path("/oauth/access_token")))
        .and(query_param("client_id", APP_ID))
        .and(query_param("client_secret", APP_SECRET))
        .and(query_param("grant_type", "client_credentials"))
        .and(query_param_is_missing("access_token"))
        .and(query_param_is_missing("appsecret_proof"))
        .respond_with(token_body("app-123|token", None))
        .expect(1)
        .mount(&server)
        .await;

    let token = client.get_app_token().await.expect("get_app_token failed");

    assert_eq!(token.access_token, "app-123|token");
    assert!(token.expires_in.is_none());
}

#[tokio::test]
async fn test_exchange_code() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(method("GET"))
        .and(path(api_path("/oauth/access_token")))
        .and(query_param("client_id", APP_ID))
        .and(query_param("client_secret", APP_SECRET))
        .and(query_param("redirect_uri", "https://example.com/callback"))
        .and(query_param("code", "auth-code"))
        .respond_with(token_body("short-lived", Some(3600)))
        .expect(1)
        .mount(&server)
        .await;

    let token = client
        .exchange_code("https://example.com/callback", "auth-code")
        .await
        .expect("exchange_code failed");

    assert_eq!(token.access_token, "short-lived");
    assert_eq!(token.expires_in, Some(3600));
}

#[tokio::test]
async fn test_extend_token() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(method("GET"))
        .and(path(api_path("/oauth/access_token")))
        .and(query_param("grant_type", "fb_exchange_token"))
        .and(query_param("fb_exchange_token", "short-lived"))
        .and(query_param("client_id", APP_ID))
        .and(query_param("client_secret", APP_SECRET))
        .respond_with(token_body("long-lived", Some(5_183_944)))
        .expect(1)
        .mount(&server)
        .await;

    let token = client
        .extend_token("short-lived")
        .await
        .expect("extend_token failed");

    assert_eq!(token.access_token, "long-lived");
}

#[tokio::test]
async fn test_inspect_token() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(method("GET"))
        .and(path(api_path("/debug_token")))
        .and(query_param("input_token", "user-token"))
        .and(query_param("access_token", "app-123|token"))
        .and(query_param_is_missing("appsecret_proof"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "app_id": APP_ID,
                "type": "USER",
                "application": "Test App",
                "expires_at": 1_352_419_328,
                "is_valid": true,
                "scopes": ["pages_show_list"],
                "user_id": "1207059"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let inspection = client
        .inspect_token("user-token", "app-123|token")
        .await
        .expect("inspect_token failed");

    assert!(inspection.is_valid);
    assert_eq!(inspection.user_id.as_deref(), Some("1207059"));
    assert_eq!(inspection.scopes, vec!["pages_show_list"]);
}

#[tokio::test]
async fn test_inspect_invalid_token_reports_nested_error() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(method("GET"))
        .and(path(api_path("/debug_token")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "error": {"code": 190, "message": "Invalid OAuth access token."},
                "is_valid": false,
                "scopes": []
            }
        })))
        .mount(&server)
        .await;

    let result = client.inspect_token("garbage", "app-123|token").await;

    assert!(matches!(result, Err(GraphError::InvalidOAuthToken(_))));
}

#[tokio::test]
async fn test_authorization_url_uses_version() {
    let client = fbmarketing_graph::GraphClient::new(APP_ID, APP_SECRET, "15.0");

    let url = client
        .authorization_url("https://example.com/callback", "xyz", &["email"])
        .expect("authorization_url failed");

    assert!(url.starts_with("https://facebook.com/v15.0/dialog/oauth?"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("state=xyz"));
}
