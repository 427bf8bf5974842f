//! Shared utilities for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use places_api::config::AppConfig;
use places_api::http::HttpServer;
use places_api::store::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Server over an in-memory store with default config.
#[allow(dead_code)]
pub fn test_server(config: AppConfig) -> HttpServer {
    let store = Arc::new(MemoryStore::new(config.store.table.clone()));
    HttpServer::new(config, store).unwrap()
}

#[allow(dead_code)]
pub fn test_app() -> Router {
    test_server(AppConfig::default()).into_app()
}

/// A sent request's status, JSON body, and `x-request-id` header.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub request_id: Option<String>,
}

/// Drive a single request through the app without a socket.
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        body,
        request_id,
    }
}

#[allow(dead_code)]
pub async fn request(app: &Router, method: Method, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn request_with_body(app: &Router, method: Method, uri: &str, body: &'static str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}
