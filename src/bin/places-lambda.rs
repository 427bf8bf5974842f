//! Serverless entry point.
//!
//! Wraps the same axum app as the standalone server in the Lambda HTTP
//! adapter, which translates API Gateway events to HTTP requests and back.

use std::path::PathBuf;

use places_api::lifecycle::bootstrap;

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    let config_path = std::env::var_os("PLACES_CONFIG").map(PathBuf::from);

    let server = bootstrap(config_path.as_deref()).await?;

    lambda_http::run(server.into_app()).await
}
