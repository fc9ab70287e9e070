//! Response cache collaborator seam.
//!
//! The engine only gets and puts; TTL and eviction policy belong to the
//! implementation (`trackline-middleware` ships a moka-backed one).

use async_trait::async_trait;

use trackline_types::{TrackingRecord, TrackingRequest, TrackingType};

/// Cache identity of a request: normalized number plus tracking type.
///
/// User tier and cost flags deliberately do not participate; the shipment
/// state is the same regardless of who asks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Normalized tracking number.
    pub tracking_number: String,
    /// Tracking type the number was requested as.
    pub tracking_type: TrackingType,
}

impl CacheKey {
    /// Derive the cache key for a request.
    #[must_use]
    pub fn for_request(req: &TrackingRequest) -> Self {
        Self {
            tracking_number: req.normalized_number(),
            tracking_type: req.tracking_type,
        }
    }
}

/// A pluggable store for recently fetched tracking records.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Look up a fresh record for the key.
    async fn get(&self, key: &CacheKey) -> Option<TrackingRecord>;

    /// Store a record under the key.
    async fn put(&self, key: CacheKey, record: TrackingRecord);
}
