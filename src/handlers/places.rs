use serde::Serialize;

use crate::errors::ApiError;
use crate::http::request::ApiRequest;
use crate::http::response::ApiResponse;

const TRENDING_MESSAGE: &str = "You are trending <3";

#[derive(Debug, Serialize)]
pub struct NearbyResponse<'a> {
    pub latitude: &'a str,
    pub longitude: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub body: &'static str,
}

/// Echo the (decoded) coordinates. No parsing or range checks.
pub fn nearby(request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(NearbyResponse {
        latitude: request.param("latitude").unwrap_or_default(),
        longitude: request.param("longitude").unwrap_or_default(),
    })
}

pub fn trending(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(TrendingResponse {
        body: TRENDING_MESSAGE,
    })
}

/// Fallback for anything the route table does not match.
pub fn not_found(_request: &ApiRequest) -> ApiResponse {
    ApiError::NotFound.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[test]
    fn test_nearby_echoes_params() {
        let mut request = ApiRequest::new(Method::GET, "/ignored");
        request.params.insert("latitude".into(), "34.0194".into());
        request.params.insert("longitude".into(), "-118.411".into());

        let response = nearby(&request);
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body.to_string(),
            r#"{"latitude":"34.0194","longitude":"-118.411"}"#
        );
    }

    #[test]
    fn test_trending() {
        let response = trending(&ApiRequest::new(Method::GET, "/places/trending"));
        assert_eq!(response.body, json!({ "body": "You are trending <3" }));
    }

    #[test]
    fn test_not_found() {
        let response = not_found(&ApiRequest::new(Method::PUT, "/anything"));
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({ "error": "Not Found" }));
    }
}
