//! Tests for the HTTP client module

use super::*;
use crate::auth::Credential;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_none());
    assert_eq!(
        config.default_headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert!(config.user_agent.starts_with("onelogin-sync/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .rate_limit(RateLimiterConfig::per_second(4))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(4, 4)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("limit", "100")
        .query("cursor", "abc")
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!(["42"]))
        .timeout(Duration::from_secs(10));

    assert_eq!(config.query.get("limit"), Some(&"100".to_string()));
    assert_eq!(config.query.get("cursor"), Some(&"abc".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn test_endpoint_of_strips_query() {
    assert_eq!(
        endpoint_of("https://acme.onelogin.com/api/2/users?cursor=abc&limit=2"),
        "https://acme.onelogin.com/api/2/users"
    );
    assert_eq!(endpoint_of("not a url?x=1"), "not a url");
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Default"}
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let data: serde_json::Value = client
        .get_json(&format!("{}/api/2/roles", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(data[0]["name"], "Default");
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2/users"))
        .and(query_param("limit", "2"))
        .and(query_param("fields", "id,email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client();
    let response = client
        .get_with_config(
            &format!("{}/api/2/users", mock_server.uri()),
            RequestConfig::new().query("limit", "2").query("fields", "id,email"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_attaches_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2/apps"))
        .and(header("Authorization", "Bearer tok-123"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client().with_credential(Credential::new("tok-123", "acme"));

    client
        .get_with_config(&format!("{}/api/2/apps", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_client_status_maps_to_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2/roles"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let err = client
        .get_with_config(
            &format!("{}/api/2/roles", mock_server.uri()),
            RequestConfig::new().query("cursor", "abc"),
        )
        .await
        .unwrap_err();

    match err {
        Error::Backend { status, endpoint } => {
            assert_eq!(status, 403);
            assert_eq!(endpoint, format!("{}/api/2/roles", mock_server.uri()));
        }
        other => panic!("Expected Backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_no_retry_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2/apps"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client();
    let err = client
        .get_with_config(&format!("{}/api/2/apps", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_http_client_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/2/roles/7/users"))
        .and(body_json(serde_json::json!(["42"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 7}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client();
    let response = client
        .post_with_config(
            &format!("{}/api/2/roles/7/users", mock_server.uri()),
            RequestConfig::new().json(serde_json::json!(["42"])),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_delete_ignores_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/2/roles/7/admins"))
        .respond_with(ResponseTemplate::new(204).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client();
    client
        .delete_with_config(
            &format!("{}/api/2/roles/7/admins", mock_server.uri()),
            RequestConfig::new().json(serde_json::json!(["42"])),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_client_request_json_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let result: crate::error::Result<serde_json::Value> = client
        .get_json(&format!("{}/api/2/users/1", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[tokio::test]
async fn test_http_client_debug_output() {
    let client = test_client().with_credential(Credential::new("tok-secret", "acme"));
    let debug = format!("{client:?}");
    assert!(debug.contains("has_credential: true"));
    assert!(!debug.contains("tok-secret"));
    assert!(debug.contains("has_rate_limiter: false"));

    let paced = HttpClient::with_config(
        HttpClientConfig::builder()
            .rate_limit(RateLimiterConfig::per_second(5))
            .build(),
    )
    .unwrap();
    assert!(format!("{paced:?}").contains("has_rate_limiter: true"));
}
