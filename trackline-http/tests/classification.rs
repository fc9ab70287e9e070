use std::collections::HashMap;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use trackline_core::{CarrierAdapter, ErrorKind};
use trackline_http::{CarrierApiConfig, EndpointMap, HttpCarrierAdapter};
use trackline_types::{
    ContainerSize, ContainerType, ProviderProfile, ServiceType, ShipmentStatus, TrackingType,
    TrackingTypes,
};

fn config(base_url: &str) -> CarrierApiConfig {
    let mut status_map = HashMap::new();
    status_map.insert("VSL_DEP".to_string(), ShipmentStatus::InTransit);

    let mut event_map = HashMap::new();
    event_map.insert("VD".to_string(), "VSL_DEP".to_string());

    let mut port_timezones = HashMap::new();
    port_timezones.insert("Shanghai, CN".to_string(), "Asia/Shanghai".to_string());

    CarrierApiConfig {
        profile: ProviderProfile::new("maersk", "Maersk")
            .reliability(0.95)
            .supported_types(TrackingTypes::CONTAINER | TrackingTypes::BOOKING)
            .timeout(Duration::from_secs(2))
            .max_retries(1),
        base_url: base_url.to_string(),
        auth_header: Some("X-Api-Key".to_string()),
        api_key: Some("test-key".to_string()),
        endpoints: EndpointMap {
            container: "/v1/containers/{number}".to_string(),
            booking: "/v1/bookings/{number}".to_string(),
            bol: "/v1/bol/{number}".to_string(),
        },
        status_map,
        event_map,
        port_timezones,
    }
}

fn adapter(server: &MockServer) -> HttpCarrierAdapter {
    HttpCarrierAdapter::new(config(&server.base_url())).unwrap()
}

#[tokio::test]
async fn successful_payload_is_normalized() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/containers/MAEU1234567")
                .header("X-Api-Key", "test-key");
            then.status(200).json_body(json!({
                "tracking_number": "MAEU1234567",
                "carrier": "Maersk Line",
                "service": "fcl",
                "status": "VSL_DEP",
                "events": [
                    {
                        "id": "e1",
                        "code": "VD",
                        "timestamp": "2024-03-05T10:00:00",
                        "location": "Shanghai, CN",
                        "description": "Vessel departed",
                        "completed": true
                    },
                    {
                        "status": "DISCHARGED",
                        "timestamp": "2024-03-20T08:00:00Z",
                        "location": "Rotterdam, NL"
                    }
                ],
                "containers": [
                    { "number": "MAEU1234567", "code": "40HC" },
                    { "code": "22G1" }
                ],
                "vessel": { "name": "EMMA MAERSK", "imo": "9321483" },
                "route": {
                    "origin": { "name": "Shanghai", "locode": "CNSHA" },
                    "destination": { "name": "Rotterdam", "locode": "NLRTM" }
                }
            }));
        })
        .await;

    let record = adapter(&server)
        .fetch("MAEU1234567", TrackingType::Container)
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(record.carrier_name, "Maersk Line");
    assert_eq!(record.service, Some(ServiceType::Fcl));
    assert_eq!(record.status, ShipmentStatus::InTransit);
    assert_eq!(record.source_provider, "maersk");
    assert!((record.reliability - 0.95).abs() < 1e-9);

    assert_eq!(record.timeline.len(), 2);
    // Event code went through the event map, then the status map.
    assert_eq!(record.timeline[0].status, ShipmentStatus::InTransit);
    // Naive local time in Shanghai (UTC+8) lands at 02:00 UTC.
    assert_eq!(
        record.timeline[0].timestamp.to_rfc3339(),
        "2024-03-05T02:00:00+00:00"
    );
    assert_eq!(record.timeline[1].status, ShipmentStatus::Discharged);

    assert_eq!(record.containers[0].size, Some(ContainerSize::Size40));
    assert_eq!(record.containers[0].container_type, Some(ContainerType::Hc));
    assert_eq!(record.containers[1].size, Some(ContainerSize::Size20));
    assert_eq!(record.containers[1].container_type, Some(ContainerType::Gp));

    let route = record.route.unwrap();
    assert_eq!(route.origin.locode.as_deref(), Some("CNSHA"));
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/containers/MAEU1234567");
            then.status(401);
        })
        .await;

    let err = adapter(&server)
        .fetch("MAEU1234567", TrackingType::Container)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AuthError);
    assert!(!err.retryable());
}

#[tokio::test]
async fn missing_number_maps_to_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/containers/NONE0000000");
            then.status(404);
        })
        .await;

    let err = adapter(&server)
        .fetch("NONE0000000", TrackingType::Container)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(!err.retryable());
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/containers/MAEU1234567");
            then.status(429).header("Retry-After", "7");
        })
        .await;

    let err = adapter(&server)
        .fetch("MAEU1234567", TrackingType::Container)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RateLimit);
    assert_eq!(err.retry_after, Some(Duration::from_secs(7)));
    assert!(err.retryable());
}

#[tokio::test]
async fn server_errors_are_retryable_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/containers/MAEU1234567");
            then.status(503);
        })
        .await;

    let err = adapter(&server)
        .fetch("MAEU1234567", TrackingType::Container)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
    assert_eq!(err.status, Some(503));
    assert!(err.retryable());
}

#[tokio::test]
async fn malformed_payload_is_not_retryable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/containers/MAEU1234567");
            then.status(200).body("not json");
        })
        .await;

    let err = adapter(&server)
        .fetch("MAEU1234567", TrackingType::Container)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidResponse);
    assert!(!err.retryable(), "a malformed 2xx payload will not improve on retry");
}

#[tokio::test]
async fn unsupported_type_fails_without_a_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/bol/BOL123");
            then.status(200);
        })
        .await;

    let err = adapter(&server)
        .fetch("BOL123", TrackingType::Bol)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unsupported);
    assert_eq!(mock.hits_async().await, 0);
}

#[test]
fn missing_credentials_mark_the_adapter_unavailable() {
    let mut cfg = config("http://localhost:9");
    cfg.api_key = None;
    let adapter = HttpCarrierAdapter::new(cfg).unwrap();
    assert!(!adapter.available());
}
