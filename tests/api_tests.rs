//! API integration tests
//!
//! Drive the router directly so no listener or upstream is needed. Routes
//! that would hit a catalog are only exercised up to their validation and
//! configuration checks.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use estante_server::{api, config::AppConfig, services::Services, AppState};

fn app(google_books_key: Option<&str>) -> axum::Router {
    let mut config = AppConfig {
        server: Default::default(),
        upstream: Default::default(),
        cache: Default::default(),
        logging: Default::default(),
    };
    config.upstream.google_books_key = google_books_key.map(str::to_string);

    let services = Services::new(&config).expect("Failed to create services");
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_without_key() {
    let (status, body) = get(app(None), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["hasKey"], false);
}

#[tokio::test]
async fn test_health_with_key() {
    let (status, body) = get(app(Some("test-key")), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasKey"], true);
}

#[tokio::test]
async fn test_search_requires_q() {
    let (status, body) = get(app(Some("test-key")), "/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().expect("error field");
    assert!(!error.is_empty());
}

#[tokio::test]
async fn test_search_rejects_blank_q() {
    let (status, _) = get(app(Some("test-key")), "/search?q=%20%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_without_key_is_server_error() {
    let (status, body) = get(app(None), "/search?q=machado+de+assis").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_open_library_search_requires_q() {
    let (status, body) = get(app(None), "/ol/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_detail_requires_id() {
    let (status, body) = get(app(Some("test-key")), "/detail").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_open_library_detail_requires_id() {
    let (status, _) = get(app(None), "/ol/detail").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = get(app(None), "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
