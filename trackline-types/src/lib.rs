//! Trackline data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod profile;
mod record;
mod routing;
mod tracking;

pub use config::{BackoffConfig, CacheConfig, EngineConfig};
pub use profile::{PrefixPattern, ProviderProfile, ProviderTier, RateLimit};
pub use record::{
    Container, ContainerSize, ContainerType, Port, Route, ServiceType, ShipmentStatus,
    TimelineEvent, TrackingRecord, VesselInfo,
};
pub use routing::{CarrierMatch, MatchSource, RouteCandidate, RoutingDecision};
pub use tracking::{TrackingRequest, TrackingType, TrackingTypes, UserTier};
