//! Postal client integration tests against a local mock backend.

use std::net::SocketAddr;

use bazaar_backend::config::PostalConfig;
use bazaar_backend::postal::PostalClient;

mod common;

fn config_for(addr: SocketAddr) -> PostalConfig {
    PostalConfig {
        world_api_base: format!("http://{addr}"),
        world_api_key: "test-key".to_string(),
        pin_api_base: format!("http://{addr}"),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_lookup_pin_decodes_payload() {
    let addr: SocketAddr = "127.0.0.1:38181".parse().unwrap();
    common::start_json_backend(
        addr,
        r#"{
            "status": true,
            "result": [
                {
                    "postalcode": "560001",
                    "latitude": "12.97",
                    "longitude": "77.59",
                    "district": "Bengaluru",
                    "state": "Karnataka"
                },
                { "postalcode": "560001", "latitude": "", "longitude": "" }
            ]
        }"#,
    )
    .await;

    let client = PostalClient::new(&config_for(addr)).unwrap();
    let lookup = client.lookup_pin("560001").await.expect("lookup failed");

    assert!(lookup.status);
    assert_eq!(lookup.result.len(), 2);
    assert_eq!(lookup.result[0].coordinates(), Some((77.59, 12.97)));
    assert_eq!(lookup.result[1].coordinates(), None);
    assert_eq!(lookup.result[0].extra["district"], "Bengaluru");
}

#[tokio::test]
async fn test_lookup_pin_surfaces_unknown_pin() {
    let addr: SocketAddr = "127.0.0.1:38182".parse().unwrap();
    common::start_json_backend(addr, r#"{ "status": false, "result": [] }"#).await;

    let client = PostalClient::new(&config_for(addr)).unwrap();
    let lookup = client.lookup_pin("000000").await.expect("lookup failed");

    assert!(!lookup.status);
    assert!(lookup.result.is_empty());
}

#[tokio::test]
async fn test_lookup_pin_maps_server_errors() {
    let addr: SocketAddr = "127.0.0.1:38183".parse().unwrap();
    common::start_status_backend(addr, 503, r#"{"error":"down"}"#).await;

    let client = PostalClient::new(&config_for(addr)).unwrap();
    assert!(client.lookup_pin("560001").await.is_err());
}

#[tokio::test]
async fn test_pin_state_info_returns_raw_payload() {
    let addr: SocketAddr = "127.0.0.1:38184".parse().unwrap();
    common::start_json_backend(
        addr,
        r#"[{ "Message": "Number of pincode(s) found:1", "Status": "Success" }]"#,
    )
    .await;

    let client = PostalClient::new(&config_for(addr)).unwrap();
    let payload = client.pin_state_info("560001").await.expect("lookup failed");

    assert_eq!(payload[0]["Status"], "Success");
}
