// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! HTTP integration tests for the secret server.
//!
//! These tests use `axum-test` to drive the full request/response cycle
//! through the Axum router, with an in-memory decryptor standing in for sops.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Request, StatusCode};
use axum_test::TestServer;
use secret_server::application::{AppState, Application, create_router};
use secret_server::configuration::{DocumentConfig, SecretsConfig, ServerOptions};
use secret_server::decryptor::Decryptor;
use secret_server::errors::DecryptError;
use tower::ServiceExt;
use zeroize::Zeroizing;

const DOCUMENT: &[u8] = b"FOO=bar\n# comment\nBAZ=\"qux\"\n";
const SECRET_HEADER: HeaderName = HeaderName::from_static("x-secret-request");

/// Serves a fixed plaintext and counts how often it was asked to.
struct StaticDecryptor {
    plaintext: Vec<u8>,
    calls: AtomicUsize,
}

impl StaticDecryptor {
    fn new(plaintext: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            plaintext: plaintext.to_vec(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Decryptor for StaticDecryptor {
    async fn decrypt(
        &self,
        _location: &Path,
        _format: &str,
    ) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Zeroizing::new(self.plaintext.clone()))
    }
}

struct FailingDecryptor;

#[async_trait]
impl Decryptor for FailingDecryptor {
    async fn decrypt(
        &self,
        location: &Path,
        _format: &str,
    ) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
        Err(DecryptError::Failed {
            code: Some(128),
            stderr: format!("Failed to get the data key for {}", location.display()),
        })
    }
}

fn test_config() -> SecretsConfig {
    SecretsConfig {
        document: DocumentConfig {
            path: PathBuf::from("/tmp/secret-server-test.env"),
            format: "env".to_string(),
        },
        ..SecretsConfig::default()
    }
}

fn create_test_server(decryptor: Arc<dyn Decryptor>) -> TestServer {
    let app = create_router(AppState::new(test_config(), decryptor));
    TestServer::new(app).unwrap()
}

fn authorized() -> HeaderValue {
    HeaderValue::from_static("true")
}

/// Drives the router directly, for paths a URL-based client would rewrite.
async fn send(router: Router, path: &str, header: Option<&str>) -> (StatusCode, String) {
    let mut request = Request::builder().uri(path);
    if let Some(value) = header {
        request = request.header(SECRET_HEADER, value);
    }
    let response = router
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn test_existing_keys_return_values() {
    let server = create_test_server(StaticDecryptor::new(DOCUMENT));

    let response = server.get("/FOO").add_header(SECRET_HEADER, authorized()).await;
    response.assert_status_ok();
    response.assert_text("bar");

    let response = server.get("/BAZ").add_header(SECRET_HEADER, authorized()).await;
    response.assert_status_ok();
    response.assert_text("qux");
}

#[tokio::test]
async fn test_success_is_plain_text() {
    let server = create_test_server(StaticDecryptor::new(DOCUMENT));
    let response = server.get("/FOO").add_header(SECRET_HEADER, authorized()).await;
    assert_eq!(response.header(CONTENT_TYPE), "text/plain");
}

#[tokio::test]
async fn test_any_method_is_served() {
    let server = create_test_server(StaticDecryptor::new(DOCUMENT));
    let response = server
        .post("/FOO")
        .add_header(SECRET_HEADER, authorized())
        .await;
    response.assert_status_ok();
    response.assert_text("bar");
}

#[tokio::test]
async fn test_surrounding_slashes_are_trimmed() {
    let router = create_router(AppState::new(test_config(), StaticDecryptor::new(DOCUMENT)));
    let (status, body) = send(router, "//FOO/", Some("true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "bar");
}

// =============================================================================
// Auth gate
// =============================================================================

#[tokio::test]
async fn test_missing_header_returns_401_without_decrypting() {
    let decryptor = StaticDecryptor::new(DOCUMENT);
    let server = create_test_server(decryptor.clone());

    for path in ["/FOO", "/MISSING", "/"] {
        let response = server.get(path).await;
        response.assert_status_unauthorized();
        response.assert_text("Missing or invalid header");
    }

    assert_eq!(decryptor.calls(), 0);
}

#[tokio::test]
async fn test_wrong_header_value_returns_401() {
    let server = create_test_server(StaticDecryptor::new(DOCUMENT));
    let response = server
        .get("/FOO")
        .add_header(SECRET_HEADER, HeaderValue::from_static("True"))
        .await;
    response.assert_status_unauthorized();
}

// =============================================================================
// Not found
// =============================================================================

#[tokio::test]
async fn test_empty_key_returns_404_without_decrypting() {
    let decryptor = StaticDecryptor::new(DOCUMENT);
    let router = create_router(AppState::new(test_config(), decryptor.clone()));

    for path in ["/", "//"] {
        let (status, body) = send(router.clone(), path, Some("true")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Secret key not specified in path");
    }

    assert_eq!(decryptor.calls(), 0);
}

#[tokio::test]
async fn test_unknown_key_returns_404() {
    let decryptor = StaticDecryptor::new(DOCUMENT);
    let server = create_test_server(decryptor.clone());

    let response = server
        .get("/MISSING")
        .add_header(SECRET_HEADER, authorized())
        .await;
    response.assert_status_not_found();
    response.assert_text("404 page not found");
    assert_eq!(decryptor.calls(), 1);
}

#[tokio::test]
async fn test_lookup_is_case_sensitive() {
    let server = create_test_server(StaticDecryptor::new(DOCUMENT));
    let response = server.get("/foo").add_header(SECRET_HEADER, authorized()).await;
    response.assert_status_not_found();
}

// =============================================================================
// Decryption failures
// =============================================================================

#[tokio::test]
async fn test_decrypt_failure_returns_500_without_detail() {
    let server = create_test_server(Arc::new(FailingDecryptor));
    let response = server.get("/FOO").add_header(SECRET_HEADER, authorized()).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.text();
    assert_eq!(body, "Failed to retrieve secret");
    assert!(!body.contains("data key"));
    assert!(!body.contains("/tmp/secret-server-test.env"));
}

// =============================================================================
// Freshness and concurrency
// =============================================================================

#[tokio::test]
async fn test_every_request_decrypts_again() {
    let decryptor = StaticDecryptor::new(DOCUMENT);
    let server = create_test_server(decryptor.clone());

    for _ in 0..3 {
        server
            .get("/FOO")
            .add_header(SECRET_HEADER, authorized())
            .await
            .assert_status_ok();
    }

    assert_eq!(decryptor.calls(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_get_their_own_values() {
    const KEYS: usize = 32;

    let document: String = (0..KEYS).map(|i| format!("KEY_{i}=value-{i}\n")).collect();
    let decryptor = StaticDecryptor::new(document.as_bytes());
    let router = create_router(AppState::new(test_config(), decryptor.clone()));

    let mut handles = Vec::with_capacity(KEYS);
    for i in 0..KEYS {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            let (status, body) = send(router, &format!("/KEY_{i}"), Some("true")).await;
            (i, status, body)
        }));
    }

    for handle in handles {
        let (i, status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("value-{i}"));
    }

    assert_eq!(decryptor.calls(), KEYS);
}

// =============================================================================
// Listener
// =============================================================================

#[tokio::test]
async fn test_application_binds_ephemeral_port() {
    let state = AppState::new(test_config(), StaticDecryptor::new(DOCUMENT));
    let application = Application::build(ServerOptions { port: 0 }, state)
        .await
        .unwrap();
    assert_ne!(application.port(), 0);
}
