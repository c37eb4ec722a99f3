use directory::{DirectoryClient, DirectoryConfig, DirectoryError, HttpDirectoryClient};
use serde_json::json;
use sn_core::TenantId;
use std::collections::HashSet;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("client-one:s3cr3t")
const BASIC_AUTH: &str = "Basic Y2xpZW50LW9uZTpzM2NyM3Q=";

fn secured_client(uri: &str) -> HttpDirectoryClient {
    let mut config = DirectoryConfig::with_base_url(uri);
    config.client_id = Some("client-one".to_string());
    config.client_secret = Some("s3cr3t".to_string());
    HttpDirectoryClient::new(config).unwrap()
}

fn tenant(id: &str) -> TenantId {
    TenantId::new(id).unwrap()
}

#[tokio::test]
async fn test_check_token_resolves_security_context() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v2/check_token"))
        .and(query_param("token", "tok-123"))
        .and(header("Authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "user-17",
            "active": true,
            "client_id": "svc-orders",
            "username": "jsmith",
            "tenant_id": "t-acme",
            "assigned_tenants": ["t-acme", "t-acme-west"],
            "roles": ["OPERATOR"],
            "permissions": ["ORDERS_READ"],
            "scope": ["read", "write"],
            "token_type": "Bearer"
        })))
        .mount(&mock_server)
        .await;

    let ctx = client.check_token("tok-123").await.unwrap();
    assert_eq!(ctx.username.as_deref(), Some("jsmith"));
    assert_eq!(ctx.tenant_id, Some(tenant("t-acme")));
    assert_eq!(ctx.assigned_tenants, vec![tenant("t-acme"), tenant("t-acme-west")]);
    assert!(ctx.has_permission("ORDERS_READ"));
}

#[tokio::test]
async fn test_check_token_rejected() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    // Every status the directory uses for an unusable token.
    for (token, status) in [("malformed", 400), ("expired", 401), ("revoked", 403)] {
        Mock::given(method("POST"))
            .and(path("/v2/check_token"))
            .and(query_param("token", token))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;

        let err = client.check_token(token).await.unwrap_err();
        assert!(
            matches!(err, DirectoryError::InvalidToken(_)),
            "status {status} should map to InvalidToken"
        );
        assert!(!err.is_retryable());
    }
}

#[tokio::test]
async fn test_check_token_directory_failure() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v2/check_token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = client.check_token("tok-123").await.unwrap_err();
    assert!(matches!(err, DirectoryError::Api { status: 500, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_check_token_malformed_body() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v2/check_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = client.check_token("tok-123").await.unwrap_err();
    assert!(matches!(err, DirectoryError::Decode(_)));
}

#[tokio::test]
async fn test_get_tenant_root() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/root"))
        .and(header("Authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_string("t-root\n"))
        .mount(&mock_server)
        .await;

    let root = client.get_tenant_root().await.unwrap();
    assert_eq!(root, tenant("t-root"));
}

#[tokio::test]
async fn test_get_tenant_root_blank_body_is_malformed() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/root"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&mock_server)
        .await;

    let err = client.get_tenant_root().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Decode(_)));
}

#[tokio::test]
async fn test_get_tenant_parent() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/parent"))
        .and(query_param("tenantId", "t-acme-west"))
        .respond_with(ResponseTemplate::new(200).set_body_string("t-acme"))
        .mount(&mock_server)
        .await;

    let parent = client.get_tenant_parent(&tenant("t-acme-west")).await.unwrap();
    assert_eq!(parent, Some(tenant("t-acme")));
}

#[tokio::test]
async fn test_get_tenant_parent_blank_body_means_none() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/parent"))
        .and(query_param("tenantId", "t-root"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/parent"))
        .and(query_param("tenantId", "t-orphan"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
        .mount(&mock_server)
        .await;

    assert_eq!(client.get_tenant_parent(&tenant("t-root")).await.unwrap(), None);
    assert_eq!(client.get_tenant_parent(&tenant("t-orphan")).await.unwrap(), None);
}

#[tokio::test]
async fn test_get_tenant_parent_failure_is_an_error_not_none() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/parent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = client.get_tenant_parent(&tenant("t-acme")).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Api { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_get_tenant_ancestors() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/ancestors"))
        .and(query_param("tenantId", "t-acme-west"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["t-acme", "t-root"])))
        .mount(&mock_server)
        .await;

    let ancestors = client.get_tenant_ancestors(&tenant("t-acme-west")).await.unwrap();
    let expected: HashSet<TenantId> = [tenant("t-acme"), tenant("t-root")].into_iter().collect();
    assert_eq!(ancestors, expected);
}

#[tokio::test]
async fn test_get_tenant_ancestors_empty_for_root() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/ancestors"))
        .and(query_param("tenantId", "t-root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let ancestors = client.get_tenant_ancestors(&tenant("t-root")).await.unwrap();
    assert!(ancestors.is_empty());
}

#[tokio::test]
async fn test_get_tenant_children() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/children"))
        .and(query_param("tenantId", "t-acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["t-acme-west", "t-acme-east"])))
        .mount(&mock_server)
        .await;

    let children = client.get_tenant_children(&tenant("t-acme")).await.unwrap();
    assert_eq!(children.len(), 2);
    assert!(children.contains(&tenant("t-acme-east")));
}

#[tokio::test]
async fn test_query_parameters_are_percent_encoded() {
    let mock_server = MockServer::start().await;
    let client = secured_client(&mock_server.uri());

    // wiremock matches against the decoded value; a tenant id with a space
    // only matches if the client encoded it on the way out.
    Mock::given(method("GET"))
        .and(path("/v2/tenant_hierarchy/ancestors"))
        .and(query_param("tenantId", "acme west"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["t-root"])))
        .mount(&mock_server)
        .await;

    let ancestors = client.get_tenant_ancestors(&tenant("acme west")).await.unwrap();
    assert_eq!(ancestors.len(), 1);
}
