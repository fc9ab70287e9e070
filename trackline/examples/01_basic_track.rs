//! Track a container across two mock providers with fallback.
//!
//! Run with: `cargo run --example 01_basic_track`

use std::sync::Arc;

use trackline::{ErrorKind, Trackline, TrackingRequest, TrackingType};
use trackline_mock::{MockAdapter, in_transit_record};
use trackline_types::ProviderProfile;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // The primary provider is down today; the backup serves the record.
    let primary = Arc::new(
        MockAdapter::builder("primary")
            .profile(ProviderProfile::new("primary", "Primary API").reliability(0.9))
            .default_fails(ErrorKind::Network)
            .build(),
    );
    let backup = Arc::new(
        MockAdapter::builder("backup")
            .profile(ProviderProfile::new("backup", "Backup API").reliability(0.7))
            .default_record(in_transit_record("backup", "Maersk", "MAEU1234567"))
            .build(),
    );

    let engine = Trackline::builder()
        .with_adapter(primary)
        .with_adapter(backup)
        .build()?;

    let req = TrackingRequest::new("MAEU1234567", TrackingType::Container);
    let record = engine.track(&req).await?;

    println!(
        "{} via {}: {} ({} events)",
        record.tracking_number,
        record.source_provider,
        record.status,
        record.timeline.len()
    );
    Ok(())
}
