use std::time::Duration;

use trackline_types::{
    PrefixPattern, ProviderProfile, ProviderTier, TrackingRequest, TrackingType, TrackingTypes,
    UserTier,
};

#[test]
fn profile_round_trips_through_json() {
    let profile = ProviderProfile::new("maersk", "Maersk")
        .tier(ProviderTier::Premium)
        .cost_cents(25)
        .reliability(0.95)
        .supported_types(TrackingTypes::CONTAINER | TrackingTypes::BOOKING)
        .prefix("MAEU", 95)
        .prefix("MRKU", 90)
        .timeout(Duration::from_secs(8))
        .max_retries(3);

    let json = serde_json::to_string(&profile).unwrap();
    let back: ProviderProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, profile);
}

#[test]
fn supported_types_serialize_as_readable_list() {
    let types = TrackingTypes::CONTAINER | TrackingTypes::BOL;
    let json = serde_json::to_value(types).unwrap();
    assert_eq!(json, serde_json::json!(["container", "bol"]));

    let back: TrackingTypes = serde_json::from_value(json).unwrap();
    assert!(back.supports(TrackingType::Container));
    assert!(!back.supports(TrackingType::Booking));
    assert!(back.supports(TrackingType::Bol));
}

#[test]
fn profile_json_defaults_optional_fields() {
    let json = serde_json::json!({
        "id": "freeapi",
        "display_name": "Free API",
        "base_reliability": 0.8,
        "supported_types": ["container"],
        "timeout": { "secs": 5, "nanos": 0 },
        "max_retries": 2
    });
    let profile: ProviderProfile = serde_json::from_value(json).unwrap();
    assert_eq!(profile.tier, ProviderTier::Free);
    assert_eq!(profile.cost_per_request_cents, 0);
    assert!(profile.prefix_patterns.is_empty());
    assert_eq!(profile.rate_limit.per_minute, 60);
}

#[test]
fn prefix_confidence_is_clamped() {
    let profile = ProviderProfile::new("x", "X").prefix("ABCD", 200);
    assert_eq!(
        profile.prefix_patterns,
        vec![PrefixPattern { prefix: "ABCD".into(), confidence: 100 }]
    );
}

#[test]
fn request_normalization_and_cost_sensitivity() {
    let req = TrackingRequest::new("  maeu1234567 ", TrackingType::Container);
    assert_eq!(req.normalized_number(), "MAEU1234567");
    assert!(req.cost_sensitive(), "free tier is cost sensitive by default");

    let premium = req.clone().user_tier(UserTier::Premium);
    assert!(!premium.cost_sensitive());
    assert!(premium.cost_optimize(true).cost_sensitive());
}
