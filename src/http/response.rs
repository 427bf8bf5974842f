//! Response values produced by handlers.
//!
//! # Responsibilities
//! - Carry a status code and JSON body out of the routing layer
//! - Convert into an axum response with `content-type: application/json`
//!
//! # Design Decisions
//! - Handlers return `ApiResponse` directly; they never touch axum types
//! - Error bodies come from `ApiError`, so every 404 (and every 400) is identical

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::ApiError;

/// A status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// 200 with the serialized `body`.
    pub fn ok<T: Serialize>(body: T) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status<T: Serialize>(status: StatusCode, body: T) -> Self {
        // Plain structs and maps never fail to serialize.
        let body = serde_json::to_value(body).unwrap_or(Value::Null);
        Self { status, body }
    }
}

/// `{"error": <public message>}` with the error's status.
impl From<ApiError> for ApiResponse {
    fn from(error: ApiError) -> Self {
        Self {
            status: error.status(),
            body: json!({ "error": error.public_message() }),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
