use std::sync::Arc;
use std::time::Duration;

use trackline_core::{CacheKey, CarrierAdapter, ResponseCache};
use trackline_middleware::{CachingAdapter, MokaResponseCache};
use trackline_mock::{MockAdapter, in_transit_record};
use trackline_types::{CacheConfig, TrackingType};

fn short_ttl(ttl: Duration) -> CacheConfig {
    CacheConfig {
        ttl,
        max_entries: 16,
    }
}

#[tokio::test]
async fn repeated_fetch_hits_the_cache() {
    let mock = Arc::new(
        MockAdapter::builder("mock")
            .default_record(in_transit_record("mock", "Mock Line", "MOCU1234567"))
            .build(),
    );
    let cached = CachingAdapter::new(mock.clone(), &short_ttl(Duration::from_secs(60)));

    let first = cached.fetch("MOCU1234567", TrackingType::Container).await.unwrap();
    let second = cached.fetch("MOCU1234567", TrackingType::Container).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(mock.calls(), 1, "second fetch must be served from cache");
}

#[tokio::test]
async fn distinct_tracking_types_do_not_share_entries() {
    let mock = Arc::new(
        MockAdapter::builder("mock")
            .default_record(in_transit_record("mock", "Mock Line", "REF123"))
            .build(),
    );
    let cached = CachingAdapter::new(mock.clone(), &short_ttl(Duration::from_secs(60)));

    cached.fetch("REF123", TrackingType::Booking).await.unwrap();
    cached.fetch("REF123", TrackingType::Bol).await.unwrap();
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let mock = Arc::new(
        MockAdapter::builder("mock")
            .default_record(in_transit_record("mock", "Mock Line", "MOCU1234567"))
            .build(),
    );
    let cached = CachingAdapter::new(mock.clone(), &short_ttl(Duration::from_millis(50)));

    cached.fetch("MOCU1234567", TrackingType::Container).await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    cached.fetch("MOCU1234567", TrackingType::Container).await.unwrap();
    assert_eq!(mock.calls(), 2, "entry past its TTL must be refetched");
}

#[tokio::test]
async fn failures_are_not_cached() {
    let mock = Arc::new(
        MockAdapter::builder("mock")
            .then_fails(trackline_core::ErrorKind::Network)
            .default_record(in_transit_record("mock", "Mock Line", "MOCU1234567"))
            .build(),
    );
    let cached = CachingAdapter::new(mock.clone(), &short_ttl(Duration::from_secs(60)));

    assert!(cached.fetch("MOCU1234567", TrackingType::Container).await.is_err());
    assert!(cached.fetch("MOCU1234567", TrackingType::Container).await.is_ok());
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn response_cache_round_trip() {
    let cache = MokaResponseCache::new(&short_ttl(Duration::from_secs(60)));
    let key = CacheKey {
        tracking_number: "MOCU1234567".to_string(),
        tracking_type: TrackingType::Container,
    };
    assert!(cache.get(&key).await.is_none());

    let record = in_transit_record("mock", "Mock Line", "MOCU1234567");
    cache.put(key.clone(), record.clone()).await;
    assert_eq!(cache.get(&key).await, Some(record));
}
