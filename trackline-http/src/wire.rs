//! Tolerant wire-format structs for upstream JSON payloads.
//!
//! Every field is optional; normalization decides what a usable response
//! needs. Unknown fields are ignored.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrackingResponse {
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub service: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
    #[serde(default)]
    pub containers: Vec<RawContainer>,
    pub vessel: Option<RawVessel>,
    pub route: Option<RawRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEvent {
    pub id: Option<String>,
    pub code: Option<String>,
    pub status: Option<String>,
    /// RFC 3339, or a naive local timestamp resolved via the port-timezone
    /// table.
    pub timestamp: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawContainer {
    pub number: Option<String>,
    /// Size/type code, friendly (`40HC`) or ISO 6346 (`45G1`).
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawVessel {
    pub name: Option<String>,
    pub imo: Option<String>,
    pub voyage: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    pub origin: Option<RawPort>,
    pub destination: Option<RawPort>,
    #[serde(default)]
    pub stops: Vec<RawPort>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPort {
    pub name: Option<String>,
    pub locode: Option<String>,
}
