//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: token request → connector → paginated
//! sync calls and role writes

use onelogin_sync::types::{EntitlementKind, ResourceTypeTag};
use onelogin_sync::{ConnectorConfig, Error, OneLoginConnector, ResourceId, SyncRecord};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{any, body_json, header, headers, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn config(server: &MockServer) -> ConnectorConfig {
    let mut config = ConnectorConfig::new("abc", "s3cret", "acme");
    config.base_url = Some(server.uri());
    config.page_size = 2;
    config
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/oauth2/v2/token"))
        .and(headers("Authorization", vec!["client_id:abc", "client_secret:s3cret"]))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-xyz",
            "expires_in": 36000,
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn connect(server: &MockServer) -> OneLoginConnector {
    mount_token(server).await;
    OneLoginConnector::new(&config(server)).await.unwrap()
}

fn ids(items: &[onelogin_sync::PhaseItem]) -> Vec<i64> {
    items
        .iter()
        .map(|item| item.payload["id"].as_i64().unwrap())
        .collect()
}

/// Role 7 with two apps (full first page, empty tail), no admins, and three
/// members split over two pages
async fn mount_role_seven(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/2/roles/7/apps"))
        .and(query_param("limit", "2"))
        .and(header("Authorization", "Bearer tok-xyz"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("after-cursor", "apps-2")
                .set_body_json(json!([{"id": 55, "name": "Slack"}, {"id": 56, "name": "Zoom"}])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2/roles/7/apps"))
        .and(query_param("cursor", "apps-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2/roles/7/admins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2/roles/7/users"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("after-cursor", "users-2")
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2/roles/7/users"))
        .and(query_param("cursor", "users-2"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .mount(server)
        .await;
}

// ============================================================================
// Construction
// ============================================================================

#[tokio::test]
async fn test_rejected_credentials_fail_construction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth2/v2/token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = OneLoginConnector::new(&config(&mock_server))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth { status: Some(401), .. }));
}

#[tokio::test]
async fn test_invalid_config_fails_before_any_request() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = config(&mock_server);
    config.client_secret = String::new();

    let err = OneLoginConnector::new(&config).await.unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[tokio::test]
async fn test_validate_reports_missing_scope() {
    let mock_server = MockServer::start().await;
    let connector = connect(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/2/connectors"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = connector.validate().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.kind(), "backend");
}

// ============================================================================
// Resumable Traversal
// ============================================================================

#[tokio::test]
async fn test_role_grant_traversal_resumes_across_calls() {
    let mock_server = MockServer::start().await;
    let connector = connect(&mock_server).await;
    mount_role_seven(&mock_server).await;

    let first = connector
        .list(ResourceTypeTag::Role, Some("7"), "")
        .await
        .unwrap();
    assert_eq!(ids(&first.items), vec![55, 56]);
    assert!(first.items.iter().all(|i| i.phase == ResourceTypeTag::RoleApps));
    assert!(!first.is_last());

    let second = connector
        .list(ResourceTypeTag::Role, Some("7"), &first.next_token)
        .await
        .unwrap();
    assert!(second.items.is_empty());
    assert!(!second.is_last());

    let third = connector
        .list(ResourceTypeTag::Role, Some("7"), &second.next_token)
        .await
        .unwrap();
    assert_eq!(ids(&third.items), vec![1, 2]);
    assert!(third.items.iter().all(|i| i.phase == ResourceTypeTag::RoleMembers));

    // Replaying a token yields the same page.
    let replay = connector
        .list(ResourceTypeTag::Role, Some("7"), &second.next_token)
        .await
        .unwrap();
    assert_eq!(replay, third);

    let last = connector
        .list(ResourceTypeTag::Role, Some("7"), &third.next_token)
        .await
        .unwrap();
    assert_eq!(ids(&last.items), vec![3]);
    assert_eq!(last.next_token, "");
}

#[tokio::test]
async fn test_body_cursor_group_listing() {
    let mock_server = MockServer::start().await;
    let connector = connect(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/1/groups"))
        .and(query_param("limit", "2"))
        .and(query_param_is_missing("after_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 9, "name": "Eng"}, {"id": 10, "name": "Ops"}],
            "pagination": {"after_cursor": "g-2", "before_cursor": null}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/1/groups"))
        .and(query_param("limit", "2"))
        .and(query_param("after_cursor", "g-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 11, "name": "Sales"}],
            "pagination": {"after_cursor": null}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let first = connector
        .list(ResourceTypeTag::Group, None, "")
        .await
        .unwrap();
    assert_eq!(ids(&first.items), vec![9, 10]);

    let last = connector
        .list(ResourceTypeTag::Group, None, &first.next_token)
        .await
        .unwrap();
    assert_eq!(ids(&last.items), vec![11]);
    assert!(last.is_last());
}

#[tokio::test]
async fn test_malformed_token_makes_no_request() {
    let mock_server = MockServer::start().await;
    let connector = connect(&mock_server).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = connector
        .list(ResourceTypeTag::Role, Some("7"), "%%%not-base64")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "token");
}

#[tokio::test]
async fn test_backend_failure_keeps_previous_token_valid() {
    let mock_server = MockServer::start().await;
    let connector = connect(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/2/apps"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("after-cursor", "p2")
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2/apps"))
        .and(query_param("cursor", "p2"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2/apps"))
        .and(query_param("cursor", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .mount(&mock_server)
        .await;

    let first = connector.list(ResourceTypeTag::App, None, "").await.unwrap();

    let err = connector
        .list(ResourceTypeTag::App, None, &first.next_token)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(429));

    let retried = connector
        .list(ResourceTypeTag::App, None, &first.next_token)
        .await
        .unwrap();
    assert_eq!(ids(&retried.items), vec![3]);
    assert!(retried.is_last());
}

// ============================================================================
// Full Sync
// ============================================================================

#[tokio::test]
async fn test_sync_roles_emits_resources_entitlements_and_grants() {
    let mock_server = MockServer::start().await;
    let connector = connect(&mock_server).await;
    mount_role_seven(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/2/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 7, "name": "Engineering"}])))
        .mount(&mock_server)
        .await;

    let mut records = Vec::new();
    let stats = connector
        .sync(&[ResourceTypeTag::Role], |record| records.push(record))
        .await
        .unwrap();

    assert_eq!(stats.resources, 1);
    assert_eq!(stats.grants, 5);

    assert!(matches!(&records[0], SyncRecord::Resource(r) if r.display_name == "Engineering"));
    assert!(matches!(&records[1], SyncRecord::Entitlement(e) if e.kind == EntitlementKind::Member));
    assert!(matches!(&records[2], SyncRecord::Entitlement(e) if e.kind == EntitlementKind::Admin));

    let grants: Vec<String> = records
        .iter()
        .filter_map(|r| match r {
            SyncRecord::Grant(g) => Some(g.id()),
            _ => None,
        })
        .collect();
    assert_eq!(
        grants,
        vec![
            "role:7:admin:app:55",
            "role:7:admin:app:56",
            "role:7:member:user:1",
            "role:7:member:user:2",
            "role:7:member:user:3",
        ]
    );
}

// ============================================================================
// Role Writes
// ============================================================================

#[tokio::test]
async fn test_grant_and_revoke_role_membership() {
    let mock_server = MockServer::start().await;
    let connector = connect(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/2/roles/7/users"))
        .and(header("Authorization", "Bearer tok-xyz"))
        .and(body_json(json!(["42"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 7}])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/2/roles/7/admins"))
        .and(body_json(json!(["42"])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = ResourceId::user(42);
    connector
        .grant("7", &user, EntitlementKind::Member)
        .await
        .unwrap();
    connector
        .revoke("7", &user, EntitlementKind::Admin)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_grant_failure_preserves_status() {
    let mock_server = MockServer::start().await;
    let connector = connect(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/2/roles/7/admins"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = connector
        .grant("7", &ResourceId::user(42), EntitlementKind::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Backend { status: 404, .. }));
}
