//! Core contracts for the Trackline ecosystem: the `CarrierAdapter` trait,
//! the unified error types, the provider registry, payload-normalization
//! helpers, the failure tracker and the middleware/cache seams.
#![warn(missing_docs)]

pub mod adapter;
pub mod cache;
pub mod error;
pub mod health;
pub mod middleware;
pub mod normalize;
pub mod registry;

pub use adapter::CarrierAdapter;
pub use cache::{CacheKey, ResponseCache};
pub use error::{ErrorKind, ProviderAttempt, ProviderError, TrackError};
pub use health::FailureTracker;
pub use middleware::Middleware;
pub use registry::ProviderRegistry;

/// Re-export of the shared DTO crate.
pub use trackline_types as types;

pub use trackline_types::{
    BackoffConfig, CacheConfig, CarrierMatch, Container, ContainerSize, ContainerType,
    EngineConfig, MatchSource, Port, PrefixPattern, ProviderProfile, ProviderTier, RateLimit,
    Route, RouteCandidate, RoutingDecision, ServiceType, ShipmentStatus, TimelineEvent,
    TrackingRecord, TrackingRequest, TrackingType, TrackingTypes, UserTier, VesselInfo,
};
