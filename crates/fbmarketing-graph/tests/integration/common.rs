//! Shared test helpers for Graph API integration tests
//!
//! Each helper mounts mock endpoints on a wiremock server and returns a
//! GraphClient pointing at it.

use serde_json::Value;
use wiremock::{MockServer, ResponseTemplate};

use fbmarketing_graph::{auth::app_secret_proof, GraphClient};

pub const APP_ID: &str = "app-123";
pub const APP_SECRET: &str = "test-app-secret";
pub const ACCESS_TOKEN: &str = "test-access-token";
pub const VERSION: &str = "v12.0";

/// Starts a mock server and returns a client with a user token set.
pub async fn setup_graph_mock() -> (MockServer, GraphClient) {
    let server = MockServer::start().await;
    let mut client = client_for(&server);
    client.set_access_token(ACCESS_TOKEN);
    (server, client)
}

/// A client pointing at `server`, without an access token.
pub fn client_for(server: &MockServer) -> GraphClient {
    GraphClient::new(APP_ID, APP_SECRET, VERSION).with_graph_host(server.uri())
}

/// Versioned request path, e.g. `/v12.0/me`.
pub fn api_path(path: &str) -> String {
    format!("/{VERSION}{path}")
}

/// Absolute URL on the mock server, as the Graph API writes `paging.next`.
pub fn api_url(server: &MockServer, path_and_query: &str) -> String {
    format!("{}/{VERSION}{path_and_query}", server.uri())
}

/// `appsecret_proof` expected for `token`.
pub fn proof_of(token: &str) -> String {
    app_secret_proof(APP_SECRET, token).expect("compute proof")
}

/// A Graph error response.
pub fn graph_error(status: u16, code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "error": {
            "message": message,
            "type": "OAuthException",
            "code": code,
            "fbtrace_id": "AbCdEfGh"
        }
    }))
}

/// A list page with an optional `paging.next`.
pub fn page(data: Value, next: Option<String>) -> ResponseTemplate {
    let mut body = serde_json::json!({
        "data": data,
        "paging": {"cursors": {"before": "b", "after": "a"}}
    });
    if let Some(next) = next {
        body["paging"]["next"] = Value::String(next);
    }
    ResponseTemplate::new(200).set_body_json(body)
}
