//! Builder for composing adapters with middleware layers.
//!
//! Layers are pushed innermost-first: the first layer added wraps the raw
//! adapter, the last one added is outermost. The cache layer, when present,
//! must sit outside the rate limiter so cache hits do not consume budget.

use std::sync::Arc;

use trackline_core::{CarrierAdapter, Middleware, TrackError};
use trackline_types::CacheConfig;

use crate::cache::CacheLayer;
use crate::ratelimit::RateLimitLayer;

/// Composes a raw adapter with middleware wrappers.
pub struct AdapterBuilder {
    raw: Arc<dyn CarrierAdapter>,
    /// Layers in innermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl AdapterBuilder {
    /// Start from a raw, unwrapped adapter.
    #[must_use]
    pub fn new(raw: Arc<dyn CarrierAdapter>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add a rate limiter reading limits from the adapter profile.
    #[must_use]
    pub fn with_rate_limit(mut self) -> Self {
        self.layers.push(Box::new(RateLimitLayer::new()));
        self
    }

    /// Add a success cache with the given config.
    #[must_use]
    pub fn with_cache(mut self, config: CacheConfig) -> Self {
        self.layers.push(Box::new(CacheLayer::new(config)));
        self
    }

    /// Add an arbitrary middleware layer.
    #[must_use]
    pub fn with_layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.push(layer);
        self
    }

    /// Apply the layers and return the wrapped adapter.
    ///
    /// # Errors
    /// Returns `TrackError::InvalidArg` when the cache layer would end up
    /// inside the rate limiter (cache hits must not consume budget).
    pub fn build(self) -> Result<Arc<dyn CarrierAdapter>, TrackError> {
        let cache_at = self.layers.iter().position(|l| l.name() == "CachingAdapter");
        let limit_at = self
            .layers
            .iter()
            .position(|l| l.name() == "RateLimitedAdapter");
        if let (Some(cache), Some(limit)) = (cache_at, limit_at)
            && cache < limit
        {
            return Err(TrackError::invalid_arg(
                "cache layer must be added after the rate limiter",
            ));
        }

        let mut adapter = self.raw;
        for layer in self.layers {
            adapter = layer.apply(adapter);
        }
        Ok(adapter)
    }
}
