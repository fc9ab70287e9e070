use std::sync::Arc;

use trackline::{MatchSource, Trackline, TrackingTypes};
use trackline_mock::MockAdapter;
use trackline_types::ProviderProfile;

fn adapter(profile: ProviderProfile) -> Arc<MockAdapter> {
    let id = profile.id.clone();
    Arc::new(MockAdapter::builder(&id).profile(profile).build())
}

fn engine() -> Trackline {
    Trackline::builder()
        .with_adapter(adapter(
            ProviderProfile::new("maersk", "Maersk")
                .prefix("MAEU", 95)
                .prefix("MRKU", 90),
        ))
        .with_adapter(adapter(
            ProviderProfile::new("msc", "MSC").prefix("MSCU", 92).prefix("MEDU", 88),
        ))
        .with_adapter(adapter(
            ProviderProfile::new("aggregator", "Aggregator")
                .supported_types(TrackingTypes::all()),
        ))
        .build()
        .unwrap()
}

#[test]
fn registered_prefix_is_the_top_match() {
    let matches = engine().detect("MAEU1234567");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].carrier_id, "maersk");
    assert_eq!(matches[0].confidence, 95);
    assert_eq!(matches[0].source, MatchSource::Pattern("MAEU".to_string()));
}

#[test]
fn input_is_normalized_before_matching() {
    let matches = engine().detect("  maeu1234567 ");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].carrier_id, "maersk");
}

#[test]
fn one_match_per_carrier_keeps_the_highest_confidence() {
    let e = Trackline::builder()
        .with_adapter(adapter(
            ProviderProfile::new("maersk", "Maersk")
                .prefix("MAE", 60)
                .prefix("MAEU", 95),
        ))
        .build()
        .unwrap();

    let matches = e.detect("MAEU1234567");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].confidence, 95);
}

#[test]
fn matches_order_by_confidence_then_registration() {
    let e = Trackline::builder()
        .with_adapter(adapter(ProviderProfile::new("a", "A").prefix("XY", 80)))
        .with_adapter(adapter(ProviderProfile::new("b", "B").prefix("XYZ", 90)))
        .with_adapter(adapter(ProviderProfile::new("c", "C").prefix("XY", 90)))
        .build()
        .unwrap();

    let matches = e.detect("XYZ1234");
    let ids: Vec<_> = matches.iter().map(|m| m.carrier_id.as_str()).collect();
    // b and c tie at 90; b registered first.
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[test]
fn no_match_is_empty_not_an_error() {
    assert!(engine().detect("BOOKING-REF-42").is_empty());
    assert!(engine().detect("").is_empty());
}

#[test]
fn heuristic_needs_iso_shape() {
    // Owner letters match MAE*, but the category letter is X, not U.
    assert!(engine().detect("MAEX1234567").is_empty());
}

#[test]
fn heuristic_matches_owner_letters_with_capped_confidence() {
    let e = Trackline::builder()
        .with_adapter(adapter(
            ProviderProfile::new("hapag", "Hapag-Lloyd").prefix("HLCX", 85),
        ))
        .build()
        .unwrap();

    // HLCU1234567: no exact prefix hit, ISO shape, owner letters HLC agree.
    let matches = e.detect("HLCU1234567");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].carrier_id, "hapag");
    assert_eq!(matches[0].confidence, 55);
    assert_eq!(matches[0].source, MatchSource::Heuristic);

    // Different owner letters stay unmatched.
    assert!(e.detect("MRSU1234567").is_empty());
}
