//! Integration tests for Graph error classification over HTTP
//!
//! - Every known error code maps to its typed error
//! - Unknown codes become `Unexpected`
//! - Errors nested under `data` are detected on 200 responses
//! - Non-JSON bodies are reported as invalid responses

use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use fbmarketing_graph::{ErrorCode, GraphError};

use crate::common::{self, api_path};

#[tokio::test]
async fn test_every_known_code_is_classified() {
    for kind in ErrorCode::ALL {
        let (server, client) = common::setup_graph_mock().await;
        let message = format!("failure {}", kind.code());

        Mock::given(method("GET"))
            .and(path(api_path("/me")))
            .respond_with(common::graph_error(400, kind.code(), &message))
            .expect(1)
            .mount(&server)
            .await;

        let err = client.get_account().await.expect_err("call should fail");

        assert_eq!(ErrorCode::of(&err), Some(kind), "code {}", kind.code());
        assert_eq!(err.api_code(), Some(kind.code()));
        assert!(err.to_string().contains(&message));
    }
}

#[tokio::test]
async fn test_expired_token_is_invalid_oauth_token() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/me")))
        .respond_with(common::graph_error(
            400,
            190,
            "Error validating access token: Session has expired",
        ))
        .mount(&server)
        .await;

    let err = client.get_account().await.expect_err("call should fail");

    assert!(matches!(err, GraphError::InvalidOAuthToken(ref msg) if msg.contains("expired")));
    assert!(err.is_token_invalid());
}

#[tokio::test]
async fn test_unknown_code_is_unexpected() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/me")))
        .respond_with(common::graph_error(
            400,
            613,
            "Calls to this api have exceeded the rate limit.",
        ))
        .mount(&server)
        .await;

    let err = client.get_account().await.expect_err("call should fail");

    assert_eq!(
        err.to_string(),
        "Error: 613. Message Calls to this api have exceeded the rate limit."
    );
    assert!(matches!(err, GraphError::Unexpected { code: 613, .. }));
}

#[tokio::test]
async fn test_error_nested_under_data_on_success_status() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/me")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"error": {"code": 10, "message": "Permission denied"}}
        })))
        .mount(&server)
        .await;

    let err = client.get_account().await.expect_err("call should fail");

    assert!(matches!(err, GraphError::AppPermissionRequired(ref msg) if msg == "Permission denied"));
}

#[tokio::test]
async fn test_error_without_message() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/me")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": {"code": 1}})))
        .mount(&server)
        .await;

    let err = client.get_account().await.expect_err("call should fail");

    assert!(matches!(err, GraphError::Unknown(ref msg) if msg.is_empty()));
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client.get_account().await.expect_err("call should fail");

    assert!(matches!(err, GraphError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_success_body_is_returned_untouched() {
    let (server, client) = common::setup_graph_mock().await;
    let body = json!({"id": "1207059", "name": "Test User"});

    Mock::given(method("GET"))
        .and(path(api_path("/me")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let account = client.get_account().await.expect("get_account failed");

    assert_eq!(account, body);
}
