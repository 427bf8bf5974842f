//! Serve over a real socket and shut down gracefully.

use std::time::Duration;

use places_api::config::AppConfig;
use places_api::lifecycle::Shutdown;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = AppConfig::default();
    config.listener.bind_address = addr.to_string();
    let server = common::test_server(config);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/places/nearby/latitude/40.0/longitude/-73.9"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "latitude": "40.0", "longitude": "-73.9" }));

    let res = client
        .post(format!("http://{addr}/places/trending"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Not Found" }));

    let res = client
        .post(format!("http://{addr}/places/trending"))
        .header("content-type", "application/json")
        .body("{oops")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    drop(client);
    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
