//! Trackline routes ocean-freight tracking requests across multiple data
//! providers.
//!
//! Overview
//! - Detects likely-owning carriers from the tracking number's prefix.
//! - Ranks eligible providers by reliability, cost and carrier affinity,
//!   demoting providers with recent failures.
//! - Walks providers sequentially with bounded retries and exponential
//!   backoff, honoring per-provider timeouts and an overall deadline.
//! - Normalizes every provider's payload into one canonical
//!   [`TrackingRecord`] via the `trackline_core` contracts.
//!
//! Key behaviors and trade-offs
//! - Routing is deterministic: identical inputs produce identical candidate
//!   order, with registration order breaking ties. No randomness outside
//!   backoff jitter.
//! - Cost-sensitive requests (free tier, or `cost_optimize`) apply a cost
//!   pressure large enough that a cheaper provider always outranks a
//!   costlier one of equal-or-lower reliability.
//! - The provider walk is sequential, not raced: slower in the worst case,
//!   but paid provider calls are never made speculatively.
//! - Failures demote providers for a sliding window and decay linearly; a
//!   clean success clears the window. Degraded providers are never banned.
//!
//! Examples
//! Building an engine and tracking a container:
//! ```rust,ignore
//! use std::sync::Arc;
//! use trackline::{Trackline, TrackingRequest, TrackingType};
//!
//! let engine = Trackline::builder()
//!     .with_adapter(Arc::new(maersk))
//!     .with_adapter(Arc::new(free_aggregator))
//!     .build()?;
//!
//! let req = TrackingRequest::new("MAEU1234567", TrackingType::Container);
//! let record = engine.track(&req).await?;
//! println!("{} via {}", record.status, record.source_provider);
//! ```
//!
//! Inspecting the routing decision without calling anyone:
//! ```rust,ignore
//! let decision = engine.route_preview(&req);
//! for c in &decision.candidates {
//!     println!("{}: {:.1} ({})", c.provider_id, c.score, c.reasoning);
//! }
//! ```
//!
//! See `trackline/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod engine;

pub use core::{Trackline, TracklineBuilder};

pub use trackline_middleware::{AdapterBuilder, CacheLayer, MokaResponseCache, RateLimitLayer};

// Re-export core types for convenience
pub use trackline_core::{
    BackoffConfig,
    CacheConfig,
    CacheKey,
    CarrierAdapter,
    CarrierMatch,
    Container,
    ContainerSize,
    ContainerType,
    EngineConfig,
    ErrorKind,
    FailureTracker,
    MatchSource,
    Middleware,
    Port,
    PrefixPattern,
    ProviderAttempt,
    ProviderError,
    ProviderProfile,
    ProviderRegistry,
    ProviderTier,
    RateLimit,
    ResponseCache,
    Route,
    RouteCandidate,
    RoutingDecision,
    ServiceType,
    ShipmentStatus,
    TimelineEvent,
    TrackError,
    TrackingRecord,
    TrackingRequest,
    TrackingType,
    TrackingTypes,
    UserTier,
    VesselInfo,
};
