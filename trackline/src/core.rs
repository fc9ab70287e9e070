use std::sync::Arc;
use std::time::Instant;

use trackline_core::{
    CacheKey, CarrierAdapter, FailureTracker, ProviderRegistry, ResponseCache, TrackError,
};
use trackline_types::{CarrierMatch, EngineConfig, RoutingDecision, TrackingRecord, TrackingRequest};

use crate::engine;

/// Engine that routes tracking requests across registered providers.
pub struct Trackline {
    pub(crate) registry: ProviderRegistry,
    pub(crate) cfg: EngineConfig,
    pub(crate) health: FailureTracker,
    pub(crate) cache: Option<Arc<dyn ResponseCache>>,
}

/// Builder for constructing a `Trackline` engine with custom configuration.
pub struct TracklineBuilder {
    adapters: Vec<Arc<dyn CarrierAdapter>>,
    cfg: EngineConfig,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl Default for TracklineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TracklineBuilder {
    /// Create a new builder with default engine configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: vec![],
            cfg: EngineConfig::default(),
            cache: None,
        }
    }

    /// Register a carrier adapter.
    ///
    /// Registration order matters: it is the tie-break order for detection
    /// and routing, and the walk order among equally scored providers.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn CarrierAdapter>) -> Self {
        self.adapters.push(adapter);
        self
    }

    /// Replace the whole engine configuration.
    #[must_use]
    pub fn engine_config(mut self, cfg: EngineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the overall per-request deadline.
    #[must_use]
    pub const fn request_deadline(mut self, deadline: std::time::Duration) -> Self {
        self.cfg.request_deadline = deadline;
        self
    }

    /// Set the retry backoff used within a single provider.
    #[must_use]
    pub const fn backoff(mut self, backoff: trackline_types::BackoffConfig) -> Self {
        self.cfg.backoff = backoff;
        self
    }

    /// Attach a response cache consulted before any provider is called.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Validate the configuration and build the engine.
    ///
    /// # Errors
    /// Returns `TrackError::InvalidArg` when no adapter is registered or two
    /// adapters share a provider id.
    pub fn build(self) -> Result<Trackline, TrackError> {
        let registry = ProviderRegistry::new(self.adapters)?;
        let health = FailureTracker::new(
            self.cfg.failure_window,
            self.cfg.failure_weight,
            self.cfg.failure_penalty_cap,
        );
        Ok(Trackline {
            registry,
            cfg: self.cfg,
            health,
            cache: self.cache,
        })
    }
}

impl Trackline {
    /// Start building a new `Trackline` engine.
    #[must_use]
    pub fn builder() -> TracklineBuilder {
        TracklineBuilder::new()
    }

    /// Carriers that plausibly own the given tracking number, best first.
    ///
    /// An empty result is not an error; routing then falls back to every
    /// eligible provider without an affinity bonus.
    #[must_use]
    pub fn detect(&self, tracking_number: &str) -> Vec<CarrierMatch> {
        engine::detect::detect(&self.registry, tracking_number)
    }

    /// The routing decision for a request, without calling any provider.
    #[must_use]
    pub fn route_preview(&self, req: &TrackingRequest) -> RoutingDecision {
        let matches = self.detect(&req.tracking_number);
        engine::route::route(
            &self.registry,
            &self.health,
            &self.cfg,
            req,
            &matches,
            Instant::now(),
        )
    }

    /// Resolve a tracking request to a canonical record.
    ///
    /// Flow: cache lookup, carrier detection, provider scoring, then a
    /// sequential fallback walk with bounded retries. Successful records are
    /// written back to the cache.
    ///
    /// # Errors
    /// - `TrackError::InvalidArg` for an empty tracking number.
    /// - `TrackError::NoCandidates` when no registered provider is eligible.
    /// - `TrackError::AllProvidersFailed` when every candidate was tried.
    /// - `TrackError::RequestTimeout` when the deadline expired before any
    ///   provider could be attempted.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self, req),
            fields(number = %req.tracking_number, kind = %req.tracking_type),
        )
    )]
    pub async fn track(&self, req: &TrackingRequest) -> Result<TrackingRecord, TrackError> {
        if req.normalized_number().is_empty() {
            return Err(TrackError::invalid_arg("tracking number must not be empty"));
        }

        let key = CacheKey::for_request(req);
        if let Some(cache) = &self.cache
            && let Some(hit) = cache.get(&key).await
        {
            return Ok(hit);
        }

        let decision = self.route_preview(req);
        let record =
            engine::execute::execute(&self.registry, &self.health, &self.cfg, &decision, req)
                .await?;

        if let Some(cache) = &self.cache {
            cache.put(key, record.clone()).await;
        }
        Ok(record)
    }

    /// The failure tracker feeding routing penalties.
    ///
    /// Exposed for observability and for seeding failure state in tests.
    #[must_use]
    pub fn failure_tracker(&self) -> &FailureTracker {
        &self.health
    }

    /// Number of registered providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.registry.len()
    }
}
