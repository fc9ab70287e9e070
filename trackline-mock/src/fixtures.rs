//! Canned tracking records for tests and examples.

use chrono::{TimeZone, Utc};

use trackline_types::{
    Container, ContainerSize, ContainerType, Port, Route, ServiceType, ShipmentStatus,
    TimelineEvent, TrackingRecord, VesselInfo,
};

/// An in-transit FCL shipment with a two-event timeline and a 40ft HC box.
#[must_use]
pub fn in_transit_record(provider: &str, carrier_name: &str, number: &str) -> TrackingRecord {
    TrackingRecord {
        tracking_number: number.to_string(),
        carrier_name: carrier_name.to_string(),
        service: Some(ServiceType::Fcl),
        status: ShipmentStatus::InTransit,
        timeline: vec![
            TimelineEvent {
                id: "evt-1".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 3, 2, 8, 15, 0).unwrap(),
                status: ShipmentStatus::GateOut,
                location: "Shanghai, CN".to_string(),
                description: "Container picked up at terminal".to_string(),
                is_completed: true,
                lat: Some(31.2304),
                lng: Some(121.4737),
            },
            TimelineEvent {
                id: "evt-2".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 21, 40, 0).unwrap(),
                status: ShipmentStatus::InTransit,
                location: "East China Sea".to_string(),
                description: "Vessel departed".to_string(),
                is_completed: true,
                lat: None,
                lng: None,
            },
        ],
        containers: vec![Container {
            number: Some(number.to_string()),
            size: Some(ContainerSize::Size40),
            container_type: Some(ContainerType::Hc),
        }],
        vessel: Some(VesselInfo {
            name: "EVER GLORY".to_string(),
            imo: Some("9811000".to_string()),
            voyage: Some("012E".to_string()),
        }),
        route: Some(Route {
            origin: Port {
                name: "Shanghai".to_string(),
                locode: Some("CNSHA".to_string()),
            },
            destination: Port {
                name: "Rotterdam".to_string(),
                locode: Some("NLRTM".to_string()),
            },
            stops: vec![Port {
                name: "Singapore".to_string(),
                locode: Some("SGSIN".to_string()),
            }],
        }),
        last_updated: Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap(),
        source_provider: provider.to_string(),
        reliability: 0.9,
    }
}

/// A delivered shipment with a minimal timeline.
#[must_use]
pub fn delivered_record(provider: &str, carrier_name: &str, number: &str) -> TrackingRecord {
    TrackingRecord {
        tracking_number: number.to_string(),
        carrier_name: carrier_name.to_string(),
        service: Some(ServiceType::Lcl),
        status: ShipmentStatus::Delivered,
        timeline: vec![TimelineEvent {
            id: "evt-final".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 2, 20, 14, 0, 0).unwrap(),
            status: ShipmentStatus::Delivered,
            location: "Hamburg, DE".to_string(),
            description: "Cargo delivered to consignee".to_string(),
            is_completed: true,
            lat: None,
            lng: None,
        }],
        containers: Vec::new(),
        vessel: None,
        route: None,
        last_updated: Utc.with_ymd_and_hms(2024, 2, 21, 0, 0, 0).unwrap(),
        source_provider: provider.to_string(),
        reliability: 0.8,
    }
}
