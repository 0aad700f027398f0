//! End-to-end tests for endpoints that do not require a live database.
//!
//! The MongoDB driver connects lazily, so the server can be built and
//! exercised on static routes (and routes that fail before any database
//! call) without a running deployment.

use std::net::SocketAddr;
use std::time::Duration;

use bazaar_backend::config::ServerConfig;
use bazaar_backend::http::HttpServer;
use bazaar_backend::lifecycle::Shutdown;

mod common;

async fn start_server(proxy_addr: SocketAddr, postal_addr: Option<SocketAddr>) -> Shutdown {
    let mut config = ServerConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.observability.metrics_enabled = false;
    if let Some(addr) = postal_addr {
        config.postal.world_api_base = format!("http://{addr}");
        config.postal.pin_api_base = format!("http://{addr}");
    }

    let client = mongodb::Client::with_uri_str("mongodb://127.0.0.1:27017")
        .await
        .unwrap();
    let database = client.database("bazaar_test");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server = HttpServer::new(config, database).unwrap();
    let listener = tokio::net::TcpListener::bind(proxy_addr).await.unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;

    shutdown
}

#[tokio::test]
async fn test_health_and_static_product_metadata() {
    let addr: SocketAddr = "127.0.0.1:38281".parse().unwrap();
    let shutdown = start_server(addr, None).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(res.status(), 200);

    let res = client
        .get(format!("http://{addr}/api/products/categories"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert!(body["metadata"][0].get("subOptions").is_some());

    let res = client
        .get(format!("http://{addr}/api/products/create-fields"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    let labels: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["label"].as_str().unwrap())
        .collect();
    assert!(labels.contains(&"pincode"));
    assert!(labels.contains(&"hashtags"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_product_tag_is_fresh_token() {
    let addr: SocketAddr = "127.0.0.1:38282".parse().unwrap();
    let shutdown = start_server(addr, None).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .post(format!("http://{addr}/api/products/tag"))
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(res.status(), 201);
    let body: serde_json::Value = res.json().await.unwrap();
    let first = body["data"].as_str().unwrap().to_string();
    assert_eq!(first.len(), 32);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));

    let res = client
        .post(format!("http://{addr}/api/products/tag"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_ne!(body["data"].as_str().unwrap(), first);

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let addr: SocketAddr = "127.0.0.1:38283".parse().unwrap();
    let shutdown = start_server(addr, None).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .get(format!("http://{addr}/api/products/not-a-hex-id"))
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(res.status(), 404);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product Not Found");
    assert!(body["data"].is_null());

    shutdown.trigger();
}

#[tokio::test]
async fn test_postal_proxy_roundtrip() {
    let postal_addr: SocketAddr = "127.0.0.1:38381".parse().unwrap();
    common::start_json_backend(
        postal_addr,
        r#"{
            "status": true,
            "result": [
                { "postalcode": "110001", "latitude": "28.63", "longitude": "77.21" }
            ]
        }"#,
    )
    .await;

    let addr: SocketAddr = "127.0.0.1:38284".parse().unwrap();
    let shutdown = start_server(addr, Some(postal_addr)).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .post(format!("http://{addr}/api/products/postal-info"))
        .json(&serde_json::json!({ "pin": "110001", "state": "Delhi" }))
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["result"][0]["longitude"], "77.21");

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_propagates_to_response() {
    let addr: SocketAddr = "127.0.0.1:38285".parse().unwrap();
    let shutdown = start_server(addr, None).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("Server unreachable");
    assert!(res.headers().contains_key("x-request-id"));

    shutdown.trigger();
}
