//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum app with a single catch-all handler
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Buffer and parse the body, then dispatch to the routing engine
//! - Bind server to listener with graceful shutdown
//! - Observability (metrics, correlation IDs)

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    middleware::map_response,
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::http::request::{parse_json_body, request_id, MakeRequestUuid, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::{PatternError, Router as PlacesRouter};
use crate::store::KeyValueStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<PlacesRouter>,
    pub store: Arc<dyn KeyValueStore>,
    pub config: Arc<AppConfig>,
}

/// HTTP server for the places API.
pub struct HttpServer {
    app: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store client.
    pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, PatternError> {
        let state = AppState {
            router: Arc::new(PlacesRouter::places()?),
            store,
            config: Arc::new(config),
        };

        let app = Self::build_router(&state.config, state.clone());
        Ok(Self { app, state })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            // Every method and path goes through the places router, which owns the 404.
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            // The timeout layer answers with an empty body; give it the JSON one.
            .layer(map_response(timeout_body))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request.headers()),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
    }

    /// The fully layered app, for adapters (serverless runtimes, tests).
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    pub fn into_app(self) -> Router {
        self.app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.state.router.routes().len(),
            store_table = %self.state.store.table(),
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Handlers never produce 408, so any 408 here came from the timeout layer.
async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out");
        return ApiError::Timeout.into_response();
    }
    response
}

/// Catch-all handler.
/// Parses the body, looks up the route and runs its handler.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let start_time = Instant::now();
    let method_str = method.to_string();
    let path = uri.path();

    let parsed = body
        .map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge
            } else {
                ApiError::BodyRead(rejection.body_text())
            }
        })
        .and_then(|bytes| parse_json_body(&bytes));

    let body = match parsed {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id(&headers),
                error = %e,
                "Rejected request body"
            );
            metrics::record_request(&method_str, e.status().as_u16(), "none", start_time);
            return e.into_response();
        }
    };

    let (route, response) = state.router.dispatch(method, path, body);
    if route.is_none() {
        tracing::debug!(request_id = %request_id(&headers), path = %path, "No route matched");
    }

    metrics::record_request(
        &method_str,
        response.status.as_u16(),
        route.unwrap_or("none"),
        start_time,
    );

    response.into_response()
}
