//! Inspect how user tier and the cost-optimize flag reorder providers.
//!
//! Run with: `cargo run --example 02_cost_routing`

use std::sync::Arc;

use trackline::{Trackline, TrackingRequest, TrackingType, UserTier};
use trackline_mock::{MockAdapter, in_transit_record};
use trackline_types::{ProviderProfile, ProviderTier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let maersk = Arc::new(
        MockAdapter::builder("maersk")
            .profile(
                ProviderProfile::new("maersk", "Maersk")
                    .tier(ProviderTier::Premium)
                    .cost_cents(25)
                    .reliability(0.95)
                    .prefix("MAEU", 95),
            )
            .default_record(in_transit_record("maersk", "Maersk", "MAEU1234567"))
            .build(),
    );
    let aggregator = Arc::new(
        MockAdapter::builder("aggregator")
            .profile(ProviderProfile::new("aggregator", "Free Aggregator").reliability(0.8))
            .default_record(in_transit_record("aggregator", "Maersk", "MAEU1234567"))
            .build(),
    );

    let engine = Trackline::builder()
        .with_adapter(maersk)
        .with_adapter(aggregator)
        .build()?;

    for (label, req) in [
        (
            "premium user",
            TrackingRequest::new("MAEU1234567", TrackingType::Container)
                .user_tier(UserTier::Premium),
        ),
        (
            "free user",
            TrackingRequest::new("MAEU1234567", TrackingType::Container),
        ),
    ] {
        println!("--- {label}");
        for candidate in &engine.route_preview(&req).candidates {
            println!(
                "{:>12}  score {:8.1}  {}",
                candidate.provider_id, candidate.score, candidate.reasoning
            );
        }
        let record = engine.track(&req).await?;
        println!("served by {}\n", record.source_provider);
    }
    Ok(())
}
