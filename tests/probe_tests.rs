//! Integration tests for the probe engine
//!
//! These tests use wiremock to stand in for the target site and the proxy
//! listing service, exercising the full fetch-classify-decide cycle.

use async_trait::async_trait;
use profile_scout::config::Config;
use profile_scout::probe::ProbeEngine;
use profile_scout::proxy::{ProxyError, ProxyHandle, ProxySource};
use profile_scout::status::AccountStatus;
use profile_scout::{InputError, ScoutError};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.target.base_url = base_url.to_string();
    config.probe.request_timeout_ms = 1000;
    config.probe.concurrency_limit = 8;
    config
}

/// Markup for a live profile carrying the full metadata set
fn active_profile_body(username: &str) -> String {
    format!(
        r#"<html><head>
        <link rel="alternate" href="https://www.instagram.com/{u}/" />
        <meta property="og:title" content="Real User (@{u}) &bull; Instagram" />
        <meta property="og:description" content="42 Followers" />
        <meta property="og:image" content="https://cdn.example.com/{u}.jpg" />
        <meta property="og:type" content="profile" />
        <meta property="og:url" content="https://www.instagram.com/{u}/" />
        </head><body></body></html>"#,
        u = username
    )
}

/// Markup for a suspended profile: a page served without og:title
const SUSPENDED_PROFILE: &str = r#"<html><head>
    <meta property="og:description" content="Sorry, this page isn't available." />
    </head><body></body></html>"#;

/// Markup for a login wall: alternate link points at the login path
const LOGIN_WALL: &str = r#"<html><head>
    <link rel="alternate" href="https://www.instagram.com/accounts/login/?next=%2Fghost%2F" />
    </head><body></body></html>"#;

async fn mount_profile(server: &MockServer, username: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/", username)))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_active_and_suspended_classification() {
    let mock_server = MockServer::start().await;

    mount_profile(
        &mock_server,
        "realuser1",
        ResponseTemplate::new(200)
            .set_body_string(active_profile_body("realuser1"))
            .insert_header("content-type", "text/html"),
    )
    .await;

    mount_profile(
        &mock_server,
        "probably_suspended_xyz",
        ResponseTemplate::new(200)
            .set_body_string(SUSPENDED_PROFILE)
            .insert_header("content-type", "text/html"),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let usernames = vec![
        "realuser1".to_string(),
        "probably_suspended_xyz".to_string(),
    ];
    let results = engine.probe_all(&usernames).await.expect("Probe failed");

    assert_eq!(results.len(), 2);

    let active = results
        .iter()
        .find(|r| r.username == "realuser1")
        .expect("missing realuser1 result");
    assert_eq!(active.status, AccountStatus::Active);
    assert_eq!(active.http_status, Some(200));
    assert!(active.error.is_none());

    let metadata = active.metadata.as_ref().expect("active result lost metadata");
    assert_eq!(
        metadata.title.as_deref(),
        Some("Real User (@realuser1) • Instagram")
    );
    assert_eq!(metadata.description.as_deref(), Some("42 Followers"));
    assert_eq!(metadata.kind.as_deref(), Some("profile"));

    let suspended = results
        .iter()
        .find(|r| r.username == "probably_suspended_xyz")
        .expect("missing suspended result");
    assert_eq!(suspended.status, AccountStatus::Suspended);
    assert!(suspended.metadata.is_none());
}

#[tokio::test]
async fn test_login_wall_is_indeterminate() {
    let mock_server = MockServer::start().await;

    mount_profile(
        &mock_server,
        "ghost",
        ResponseTemplate::new(200)
            .set_body_string(LOGIN_WALL)
            .insert_header("content-type", "text/html"),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let result = engine.probe_one("ghost").await.expect("Probe failed");

    // The login wall also lacks og:title; it must NOT be counted as suspended
    assert_eq!(result.status, AccountStatus::Indeterminate);
    assert_eq!(result.http_status, Some(200));
    assert!(result
        .error
        .as_deref()
        .unwrap()
        .contains("redirected to login page"));
}

#[tokio::test]
async fn test_http_error_is_indeterminate_with_status() {
    let mock_server = MockServer::start().await;

    mount_profile(&mock_server, "missing404", ResponseTemplate::new(404)).await;

    let config = create_test_config(&mock_server.uri());
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let result = engine.probe_one("missing404").await.expect("Probe failed");

    assert_eq!(result.status, AccountStatus::Indeterminate);
    assert_eq!(result.http_status, Some(404));
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_timeout_is_indeterminate() {
    let mock_server = MockServer::start().await;

    mount_profile(
        &mock_server,
        "slowpoke",
        ResponseTemplate::new(200)
            .set_body_string(active_profile_body("slowpoke"))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let mut config = create_test_config(&mock_server.uri());
    config.probe.request_timeout_ms = 300;
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let result = engine.probe_one("slowpoke").await.expect("Probe failed");

    assert_eq!(result.status, AccountStatus::Indeterminate);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_failure_isolation_within_batch() {
    let mock_server = MockServer::start().await;

    mount_profile(
        &mock_server,
        "healthy",
        ResponseTemplate::new(200)
            .set_body_string(active_profile_body("healthy"))
            .insert_header("content-type", "text/html"),
    )
    .await;

    mount_profile(&mock_server, "broken", ResponseTemplate::new(500)).await;

    let config = create_test_config(&mock_server.uri());
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let usernames = vec!["healthy".to_string(), "broken".to_string()];
    let results = engine.probe_all(&usernames).await.expect("Probe failed");

    assert_eq!(results.len(), 2);

    let healthy = results.iter().find(|r| r.username == "healthy").unwrap();
    assert_eq!(healthy.status, AccountStatus::Active);

    let broken = results.iter().find(|r| r.username == "broken").unwrap();
    assert_eq!(broken.status, AccountStatus::Indeterminate);
    assert_eq!(broken.http_status, Some(500));
}

#[tokio::test]
async fn test_cardinality_with_duplicates() {
    let mock_server = MockServer::start().await;

    mount_profile(
        &mock_server,
        "dup",
        ResponseTemplate::new(200)
            .set_body_string(active_profile_body("dup"))
            .insert_header("content-type", "text/html"),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let usernames = vec!["dup".to_string(), "dup".to_string(), "dup".to_string()];
    let results = engine.probe_all(&usernames).await.expect("Probe failed");

    // Duplicates are probed independently: one result per submitted entry
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.username == "dup"));
    assert!(results.iter().all(|r| r.status == AccountStatus::Active));
}

#[tokio::test]
async fn test_invalid_input_rejected_before_any_fetch() {
    let mock_server = MockServer::start().await;

    // Any request reaching the server fails the test
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let usernames = vec!["realuser1".to_string(), "".to_string()];
    let result = engine.probe_all(&usernames).await;

    assert!(matches!(
        result.unwrap_err(),
        ScoutError::Input(InputError::EmptyUsername)
    ));

    let result = engine.probe_all(&[]).await;
    assert!(matches!(
        result.unwrap_err(),
        ScoutError::Input(InputError::EmptyBatch)
    ));
}

#[tokio::test]
async fn test_metadata_retention_disabled() {
    let mock_server = MockServer::start().await;

    mount_profile(
        &mock_server,
        "minimal",
        ResponseTemplate::new(200)
            .set_body_string(active_profile_body("minimal"))
            .insert_header("content-type", "text/html"),
    )
    .await;

    let mut config = create_test_config(&mock_server.uri());
    config.probe.retain_metadata = false;
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let result = engine.probe_one("minimal").await.expect("Probe failed");

    assert_eq!(result.status, AccountStatus::Active);
    assert!(result.metadata.is_none());
}

#[tokio::test]
async fn test_raw_markup_retention() {
    let mock_server = MockServer::start().await;

    mount_profile(
        &mock_server,
        "verbose",
        ResponseTemplate::new(200)
            .set_body_string(active_profile_body("verbose"))
            .insert_header("content-type", "text/html"),
    )
    .await;

    let mut config = create_test_config(&mock_server.uri());
    config.probe.retain_raw_markup = true;
    let engine = ProbeEngine::new(config).expect("Failed to create engine");

    let result = engine.probe_one("verbose").await.expect("Probe failed");

    let metadata = result.metadata.expect("metadata missing");
    assert!(metadata.raw_markup.unwrap().contains("og:title"));
}

#[tokio::test]
async fn test_proxy_listing_source_acquires_address() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"proxy":"10.1.2.3:3128"}"#),
        )
        .mount(&mock_server)
        .await;

    let source = profile_scout::proxy::ListingProxySource::new(
        &format!("{}/fresh", mock_server.uri()),
        Duration::from_secs(5),
    )
    .expect("Failed to build proxy source");

    let handle = source.acquire().await.expect("Acquisition failed");
    assert_eq!(handle.address, "10.1.2.3:3128");
}

#[tokio::test]
async fn test_proxy_listing_without_address_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"count":0}"#))
        .mount(&mock_server)
        .await;

    let source = profile_scout::proxy::ListingProxySource::new(
        &format!("{}/fresh", mock_server.uri()),
        Duration::from_secs(5),
    )
    .expect("Failed to build proxy source");

    let error = source.acquire().await.unwrap_err();
    assert!(matches!(error, ProxyError::MissingAddress));
}

/// Proxy source that always fails, for isolation testing
struct FailingProxySource;

#[async_trait]
impl ProxySource for FailingProxySource {
    async fn acquire(&self) -> Result<ProxyHandle, ProxyError> {
        Err(ProxyError::Request("listing service unreachable".to_string()))
    }
}

#[tokio::test]
async fn test_proxy_failure_becomes_per_username_result() {
    let mock_server = MockServer::start().await;

    // With proxying forced on, the target must never be fetched directly
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let engine = ProbeEngine::new(config)
        .expect("Failed to create engine")
        .with_proxy_source(Arc::new(FailingProxySource));

    let usernames = vec!["first".to_string(), "second".to_string()];
    let results = engine.probe_all(&usernames).await.expect("Batch failed");

    // The proxy outage degrades every result but aborts nothing
    assert_eq!(results.len(), 2);
    for result in &results {
        assert_eq!(result.status, AccountStatus::Indeterminate);
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .contains("proxy acquisition failed"));
    }
}
