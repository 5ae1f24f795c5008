//! Integration tests for endpoint dispatch
//!
//! - Preconditions fail before any request is sent
//! - Auth parameters, fixed parameters and page tokens
//! - Hashed audience bodies, typed and generic
//! - Response hooks

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use serde_json::{json, Value};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fbmarketing_graph::{
    api::WebhookSubscription, audience::hash_record, catalog, hooks::ResponseEvent, CallArgs,
    GraphError,
};

use crate::common::{self, api_path, proof_of, ACCESS_TOKEN, APP_ID};

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn subscription(callback_url: &str) -> WebhookSubscription {
    WebhookSubscription {
        object: "page".to_string(),
        callback_url: callback_url.to_string(),
        fields: "leadgen".to_string(),
        verify_token: "verify-me".to_string(),
    }
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(any())
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    assert!(matches!(
        client.get_account().await,
        Err(GraphError::AccessTokenRequired)
    ));
    assert!(matches!(
        client.get_pages().await,
        Err(GraphError::AccessTokenRequired)
    ));
    assert!(matches!(
        client.get_ad_accounts(&["name"]).await,
        Err(GraphError::AccessTokenRequired)
    ));
}

#[tokio::test]
async fn test_http_callback_sends_nothing() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(any())
        .respond_with(ok(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let result = client
        .create_app_subscriptions(subscription("http://example.com/webhook"), "app-token")
        .await;

    assert!(matches!(
        result,
        Err(GraphError::HttpsRequired(url)) if url == "http://example.com/webhook"
    ));
}

#[tokio::test]
async fn test_create_app_subscriptions() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("POST"))
        .and(path(api_path(&format!("/{APP_ID}/subscriptions"))))
        .and(query_param("object", "page"))
        .and(query_param("callback_url", "https://example.com/webhook"))
        .and(query_param("fields", "leadgen"))
        .and(query_param("verify_token", "verify-me"))
        .and(query_param("access_token", "app-token"))
        .and(query_param("appsecret_proof", proof_of("app-token")))
        .respond_with(ok(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .create_app_subscriptions(subscription("https://example.com/webhook"), "app-token")
        .await
        .expect("create_app_subscriptions failed");

    assert_eq!(response["success"], true);
}

#[tokio::test]
async fn test_delete_app_subscriptions_for_one_object() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("DELETE"))
        .and(path(api_path(&format!("/{APP_ID}/subscriptions"))))
        .and(query_param("object", "page"))
        .respond_with(ok(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_app_subscriptions("app-token", Some("page"))
        .await
        .expect("delete_app_subscriptions failed");
}

#[tokio::test]
async fn test_authenticated_call_carries_token_and_proof() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/lead-1")))
        .and(query_param("access_token", ACCESS_TOKEN))
        .and(query_param("appsecret_proof", proof_of(ACCESS_TOKEN)))
        .and(query_param("fields", "created_time,field_data"))
        .respond_with(ok(json!({"id": "lead-1", "field_data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let lead = client
        .get_leadgen("lead-1", &["created_time", "field_data"])
        .await
        .expect("get_leadgen failed");

    assert_eq!(lead["id"], "lead-1");
}

#[tokio::test]
async fn test_page_token_overrides_client_token() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("POST"))
        .and(path(api_path("/page-1/subscribed_apps")))
        .and(query_param("access_token", "page-token"))
        .and(query_param("appsecret_proof", proof_of("page-token")))
        .and(query_param("subscribed_fields", "leadgen"))
        .respond_with(ok(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_page_subscribed_apps("page-1", "page-token", &[("subscribed_fields", "leadgen")])
        .await
        .expect("create_page_subscribed_apps failed");
}

#[tokio::test]
async fn test_get_page_token() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/me/accounts")))
        .respond_with(ok(json!({
            "data": [
                {"id": "111", "name": "First", "access_token": "token-111"},
                {"id": "222", "name": "Second", "access_token": "token-222"}
            ]
        })))
        .mount(&server)
        .await;

    let token = client.get_page_token("222").await.expect("get_page_token failed");
    assert_eq!(token.as_deref(), Some("token-222"));

    let missing = client.get_page_token("333").await.expect("get_page_token failed");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_user_picture_asks_for_json() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/1207059/picture")))
        .and(query_param("type", "large"))
        .and(query_param("redirect", "false"))
        .respond_with(ok(json!({
            "data": {"height": 200, "is_silhouette": false, "url": "https://cdn.example/p.jpg"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let picture = client
        .get_user_picture("1207059", None)
        .await
        .expect("get_user_picture failed");

    assert_eq!(picture["data"]["url"], "https://cdn.example/p.jpg");
}

#[tokio::test]
async fn test_hashtag_search_sends_user_and_query() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/ig_hashtag_search")))
        .and(query_param("user_id", "1789"))
        .and(query_param("q", "rustlang"))
        .respond_with(ok(json!({"data": [{"id": "17843853986012965"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .search_instagram_hashtag("1789", "rustlang")
        .await
        .expect("search failed");

    assert_eq!(response["data"][0]["id"], "17843853986012965");
}

#[tokio::test]
async fn test_add_users_to_audience_sends_hashed_records() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("POST"))
        .and(path(api_path("/aud-1/users")))
        .respond_with(ok(json!({"audience_id": "aud-1", "num_received": 2})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .add_users_to_audience("aud-1", "EMAIL", &["a@example.com", "b@example.com"])
        .await
        .expect("add_users_to_audience failed");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["payload"]["schema"], "EMAIL");
    assert_eq!(
        body["payload"]["data"],
        json!([hash_record("a@example.com"), hash_record("b@example.com")])
    );
    assert_eq!(body["session"]["batch_seq"], 1);
    assert_eq!(body["session"]["last_batch_flag"], true);
    assert_eq!(body["session"]["estimated_num_total"], 2);
    let session_id = body["session"]["session_id"].as_u64().unwrap();
    assert!((1_000_000..10_000_000).contains(&session_id));
    assert!(!String::from_utf8_lossy(&requests[0].body).contains("a@example.com"));
}

#[tokio::test]
async fn test_remove_users_from_audience_uses_delete() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("/aud-1/users")))
        .respond_with(ok(json!({"audience_id": "aud-1", "num_received": 1})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .remove_users_from_audience("aud-1", "EMAIL", &["a@example.com"])
        .await
        .expect("remove_users_from_audience failed");
}

#[tokio::test]
async fn test_generic_call_by_catalog_name() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/99/insights")))
        .and(query_param("metric", "page_impressions"))
        .and(query_param("period", "day"))
        .respond_with(ok(json!({"data": [{"name": "page_impressions"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = catalog::find("insights").expect("insights endpoint");
    let args = CallArgs::new()
        .arg("99")
        .param("metric", "page_impressions")
        .param("period", "day");
    let response = client.call(endpoint, args).await.expect("call failed");

    assert_eq!(response["data"][0]["name"], "page_impressions");
}

#[tokio::test]
async fn test_generic_audience_call_hashes_records() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("POST"))
        .and(path(api_path("/55/users")))
        .respond_with(ok(json!({"audience_id": "55", "num_received": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let args = CallArgs::new().arg("55").json(json!({
        "payload": {"schema": "EMAIL", "data": ["alice@example.com"]}
    }));
    client
        .call(&catalog::ADD_AUDIENCE_USERS, args)
        .await
        .expect("add_audience_users failed");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["payload"]["schema"], "EMAIL");
    assert_eq!(
        body["payload"]["data"],
        json!([hash_record("alice@example.com")])
    );
    assert_eq!(body["session"]["last_batch_flag"], true);
    assert!(!String::from_utf8_lossy(&requests[0].body).contains("alice@example.com"));
}

#[tokio::test]
async fn test_audience_call_without_body_sends_nothing() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(any())
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = client
        .call(&catalog::REMOVE_AUDIENCE_USERS, CallArgs::new().arg("55"))
        .await;

    assert!(matches!(result, Err(GraphError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_insights_with_page_token() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/page-1/insights")))
        .and(query_param("access_token", "page-token"))
        .and(query_param("appsecret_proof", proof_of("page-token")))
        .and(query_param("metric", "page_impressions,page_engaged_users"))
        .and(query_param("period", "week"))
        .respond_with(ok(json!({"data": [{"name": "page_impressions"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .get_insights(
            "page-1",
            &["page_impressions", "page_engaged_users"],
            &[("period", "week")],
            Some("page-token"),
        )
        .await
        .expect("get_insights failed");

    assert_eq!(response["data"][0]["name"], "page_impressions");
}

#[tokio::test]
async fn test_post_comments_with_page_token() {
    let (server, client) = common::setup_graph_mock().await;

    Mock::given(method("GET"))
        .and(path(api_path("/page-1_42/comments")))
        .and(query_param("access_token", "page-token"))
        .and(query_param("appsecret_proof", proof_of("page-token")))
        .respond_with(ok(json!({"data": [{"id": "c1", "message": "Nice"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .get_post_comments("page-1_42", &["id", "message"], Some("page-token"))
        .await
        .expect("get_post_comments failed");

    assert_eq!(response["data"][0]["id"], "c1");
}

#[tokio::test]
async fn test_response_hook_sees_every_page() {
    let server = MockServer::start().await;
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let mut client = common::client_for(&server).with_response_hook(Arc::new(
        move |event: &ResponseEvent| {
            assert!(!event.url.contains(ACCESS_TOKEN));
            counter.fetch_add(1, Ordering::SeqCst);
        },
    ));
    client.set_access_token(ACCESS_TOKEN);

    Mock::given(method("GET"))
        .and(path(api_path("/me/accounts")))
        .and(query_param("after", "c1"))
        .respond_with(ok(json!({"data": [{"id": "b"}]})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path("/me/accounts")))
        .respond_with(ok(json!({
            "data": [{"id": "a"}],
            "paging": {"next": common::api_url(&server, "/me/accounts?access_token=test-access-token&after=c1")}
        })))
        .mount(&server)
        .await;

    client.get_pages().await.expect("get_pages failed");

    assert_eq!(seen.load(Ordering::SeqCst), 2);
}
