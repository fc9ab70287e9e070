//! Response caching: an engine-level `ResponseCache` and an adapter wrapper.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;

use trackline_core::{CacheKey, CarrierAdapter, Middleware, ProviderError, ResponseCache};
use trackline_types::{CacheConfig, ProviderProfile, TrackingRecord, TrackingType};

/// Moka-backed [`ResponseCache`] with TTL and capacity eviction.
pub struct MokaResponseCache {
    inner: Cache<CacheKey, TrackingRecord>,
}

impl MokaResponseCache {
    /// Create a cache from a [`CacheConfig`].
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.ttl)
                .build(),
        }
    }

    /// Number of live entries (approximate, per moka semantics).
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

#[async_trait]
impl ResponseCache for MokaResponseCache {
    async fn get(&self, key: &CacheKey) -> Option<TrackingRecord> {
        self.inner.get(key).await
    }

    async fn put(&self, key: CacheKey, record: TrackingRecord) {
        self.inner.insert(key, record).await;
    }
}

/// Adapter wrapper that memoizes successful fetches.
///
/// Only successes are cached; failures always reach the upstream again.
pub struct CachingAdapter {
    inner: Arc<dyn CarrierAdapter>,
    store: Cache<CacheKey, TrackingRecord>,
}

impl CachingAdapter {
    /// Wrap an adapter with a TTL'd success cache.
    #[must_use]
    pub fn new(inner: Arc<dyn CarrierAdapter>, config: &CacheConfig) -> Self {
        Self {
            inner,
            store: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.ttl)
                .build(),
        }
    }
}

#[async_trait]
impl CarrierAdapter for CachingAdapter {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn profile(&self) -> &ProviderProfile {
        self.inner.profile()
    }

    fn available(&self) -> bool {
        self.inner.available()
    }

    async fn fetch(
        &self,
        tracking_number: &str,
        tracking_type: TrackingType,
    ) -> Result<TrackingRecord, ProviderError> {
        let key = CacheKey {
            tracking_number: tracking_number.to_string(),
            tracking_type,
        };
        if let Some(hit) = self.store.get(&key).await {
            return Ok(hit);
        }
        let record = self.inner.fetch(tracking_number, tracking_type).await?;
        self.store.insert(key, record.clone()).await;
        Ok(record)
    }
}

/// Middleware config for constructing a [`CachingAdapter`].
pub struct CacheLayer {
    /// Cache TTL and capacity.
    pub config: CacheConfig,
}

impl CacheLayer {
    /// Create a cache layer with the given config.
    #[must_use]
    pub const fn new(config: CacheConfig) -> Self {
        Self { config }
    }
}

impl Middleware for CacheLayer {
    fn apply(self: Box<Self>, inner: Arc<dyn CarrierAdapter>) -> Arc<dyn CarrierAdapter> {
        Arc::new(CachingAdapter::new(inner, &self.config))
    }

    fn name(&self) -> &'static str {
        "CachingAdapter"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ttl_ms": self.config.ttl.as_millis(),
            "max_entries": self.config.max_entries,
        })
    }
}
