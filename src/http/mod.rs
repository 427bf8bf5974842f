//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (or serverless event via adapter)
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, JSON body parsing)
//!     → routing layer picks handler (or 404 fallback)
//!     → response.rs (status + JSON body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{ApiRequest, MakeRequestUuid, X_REQUEST_ID};
pub use response::ApiResponse;
pub use server::{AppState, HttpServer};
