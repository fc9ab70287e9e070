use std::sync::Arc;
use std::time::Duration;

use trackline_core::{CarrierAdapter, TrackError};
use trackline_middleware::AdapterBuilder;
use trackline_mock::{MockAdapter, in_transit_record};
use trackline_types::{CacheConfig, RateLimit, TrackingType};

fn mock(per_minute: u32) -> Arc<MockAdapter> {
    let profile = trackline_types::ProviderProfile::new("mock", "Mock Line").rate_limit(RateLimit {
        per_minute,
        per_hour: 1_000,
    });
    Arc::new(
        MockAdapter::builder("mock")
            .profile(profile)
            .default_record(in_transit_record("mock", "Mock Line", "MOCU1234567"))
            .build(),
    )
}

#[tokio::test]
async fn cache_outside_rate_limit_serves_hits_without_budget() {
    let inner = mock(1);
    let adapter = AdapterBuilder::new(inner.clone())
        .with_rate_limit()
        .with_cache(CacheConfig {
            ttl: Duration::from_secs(60),
            max_entries: 16,
        })
        .build()
        .unwrap();

    assert!(adapter.fetch("MOCU1234567", TrackingType::Container).await.is_ok());
    // Budget is spent, but the hit never reaches the limiter.
    assert!(adapter.fetch("MOCU1234567", TrackingType::Container).await.is_ok());
    assert_eq!(inner.calls(), 1);
}

#[test]
fn cache_inside_rate_limit_is_rejected() {
    let err = AdapterBuilder::new(mock(1))
        .with_cache(CacheConfig::default())
        .with_rate_limit()
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, TrackError::InvalidArg(_)));
}

#[tokio::test]
async fn plain_build_passes_through() {
    let inner = mock(100);
    let adapter = AdapterBuilder::new(inner.clone()).build().unwrap();
    assert_eq!(adapter.id(), "mock");
    assert!(adapter.fetch("MOCU1234567", TrackingType::Container).await.is_ok());
    assert_eq!(inner.calls(), 1);
}
