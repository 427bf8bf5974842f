use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::http::response::ApiResponse;
use crate::routing::ParamDecodeError;

/// Errors that end a request early. Each maps to one fixed JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,

    #[error("Undecodable path: {0}")]
    MalformedPath(#[from] ParamDecodeError),

    #[error("Malformed JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Payload Too Large")]
    PayloadTooLarge,

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Request Timeout")]
    Timeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MalformedPath(_) | ApiError::MalformedBody(_) | ApiError::BodyRead(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Client-facing message. Parser details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::NotFound => "Not Found",
            ApiError::MalformedPath(_) | ApiError::MalformedBody(_) | ApiError::BodyRead(_) => {
                "Bad Request"
            }
            ApiError::PayloadTooLarge => "Payload Too Large",
            ApiError::Timeout => "Request Timeout",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiResponse::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(malformed).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(ApiError::BodyRead("reset".into()).public_message(), "Bad Request");
        assert_eq!(ApiError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_into_response() {
        let response = ApiError::Timeout.into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.headers()["content-type"], "application/json");
    }
}
