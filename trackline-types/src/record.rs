//! The canonical shipment record every provider response is normalized into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service mode of the shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceType {
    /// Full container load.
    Fcl,
    /// Less than container load.
    Lcl,
}

/// Controlled shipment-status vocabulary.
///
/// Carrier strings that do not map onto a known status pass through verbatim
/// as [`ShipmentStatus::Other`] rather than being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ShipmentStatus {
    /// Booking registered with the carrier; nothing has moved yet.
    Registered,
    /// Loaded on a vessel or otherwise under way.
    InTransit,
    /// Moved between vessels at an intermediate port.
    Transshipment,
    /// Vessel arrived at the destination port.
    Arrived,
    /// Container discharged from the vessel.
    Discharged,
    /// Container left the terminal gate.
    GateOut,
    /// Cargo delivered to the consignee.
    Delivered,
    /// Empty container returned to the carrier.
    EmptyReturned,
    /// Unmapped carrier-specific status, passed through verbatim.
    Other(String),
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registered => f.write_str("registered"),
            Self::InTransit => f.write_str("in transit"),
            Self::Transshipment => f.write_str("transshipment"),
            Self::Arrived => f.write_str("arrived"),
            Self::Discharged => f.write_str("discharged"),
            Self::GateOut => f.write_str("gate out"),
            Self::Delivered => f.write_str("delivered"),
            Self::EmptyReturned => f.write_str("empty returned"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Container length class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ContainerSize {
    /// 20-foot container.
    #[serde(rename = "20ft")]
    Size20,
    /// 40-foot container.
    #[serde(rename = "40ft")]
    Size40,
    /// 45-foot container.
    #[serde(rename = "45ft")]
    Size45,
}

/// Container equipment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[non_exhaustive]
pub enum ContainerType {
    /// General purpose (dry van).
    Gp,
    /// High cube.
    Hc,
    /// Reefer.
    Rf,
    /// Open top.
    Ot,
}

/// A single container attached to the shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Container number, when the carrier reports one.
    pub number: Option<String>,
    /// Length class, when the size/type code could be parsed.
    pub size: Option<ContainerSize>,
    /// Equipment type, when the size/type code could be parsed.
    pub container_type: Option<ContainerType>,
}

/// Vessel currently (or last) carrying the shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselInfo {
    /// Vessel name.
    pub name: String,
    /// IMO number, when reported.
    pub imo: Option<String>,
    /// Voyage code, when reported.
    pub voyage: Option<String>,
}

/// A port on the shipment's route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Port name as reported by the carrier.
    pub name: String,
    /// UN/LOCODE, when reported.
    pub locode: Option<String>,
}

/// Origin, destination and intermediate stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Port of loading.
    pub origin: Port,
    /// Port of discharge.
    pub destination: Port,
    /// Transshipment stops in carrier-reported order.
    #[serde(default)]
    pub stops: Vec<Port>,
}

/// One milestone on the shipment timeline.
///
/// Timeline order is the provider's order; the engine never re-sorts events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Provider-scoped event id.
    pub id: String,
    /// Event time in UTC.
    pub timestamp: DateTime<Utc>,
    /// Normalized event label (controlled vocabulary where possible).
    pub status: ShipmentStatus,
    /// Location string as reported.
    pub location: String,
    /// Free-text description.
    pub description: String,
    /// Whether the milestone has already occurred.
    pub is_completed: bool,
    /// Latitude, when the carrier geocodes events.
    pub lat: Option<f64>,
    /// Longitude, when the carrier geocodes events.
    pub lng: Option<f64>,
}

/// The canonical tracking record returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    /// Normalized tracking number the record answers for.
    pub tracking_number: String,
    /// Display name of the owning carrier.
    pub carrier_name: String,
    /// FCL/LCL service mode, when known.
    pub service: Option<ServiceType>,
    /// Current overall status.
    pub status: ShipmentStatus,
    /// Milestones in provider order.
    pub timeline: Vec<TimelineEvent>,
    /// Containers attached to the shipment.
    pub containers: Vec<Container>,
    /// Current vessel, when known.
    pub vessel: Option<VesselInfo>,
    /// Route, when known.
    pub route: Option<Route>,
    /// When this record was assembled.
    pub last_updated: DateTime<Utc>,
    /// Id of the provider that produced the record.
    pub source_provider: String,
    /// Reliability of the source provider, copied from its profile at fetch time.
    pub reliability: f64,
}

impl TrackingRecord {
    /// Field-wise equality ignoring `last_updated`.
    ///
    /// Two fetches of an unchanged shipment produce records that differ only
    /// in assembly time; this is the comparison for that case.
    #[must_use]
    pub fn data_eq(&self, other: &Self) -> bool {
        self.tracking_number == other.tracking_number
            && self.carrier_name == other.carrier_name
            && self.service == other.service
            && self.status == other.status
            && self.timeline == other.timeline
            && self.containers == other.containers
            && self.vessel == other.vessel
            && self.route == other.route
            && self.source_provider == other.source_provider
            && self.reliability == other.reliability
    }
}
