//! Request handlers.
//!
//! Handlers are plain functions from [`ApiRequest`](crate::http::request::ApiRequest)
//! to [`ApiResponse`](crate::http::response::ApiResponse). They do no I/O.

pub mod places;
