use std::sync::Arc;

use async_trait::async_trait;
use trackline_core::{
    CarrierAdapter, ProviderError, ProviderProfile, ProviderRegistry, TrackError, TrackingRecord,
    TrackingType, TrackingTypes,
};

struct StubAdapter {
    profile: ProviderProfile,
    available: bool,
}

impl StubAdapter {
    fn new(id: &str) -> Self {
        Self {
            profile: ProviderProfile::new(id, id),
            available: true,
        }
    }

    fn only(mut self, types: TrackingTypes) -> Self {
        self.profile = self.profile.supported_types(types);
        self
    }

    fn offline(mut self) -> Self {
        self.available = false;
        self
    }
}

#[async_trait]
impl CarrierAdapter for StubAdapter {
    fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    fn available(&self) -> bool {
        self.available
    }

    async fn fetch(
        &self,
        _tracking_number: &str,
        tracking_type: TrackingType,
    ) -> Result<TrackingRecord, ProviderError> {
        Err(ProviderError::unsupported(self.id(), tracking_type))
    }
}

fn arc(adapter: StubAdapter) -> Arc<dyn CarrierAdapter> {
    Arc::new(adapter)
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = ProviderRegistry::new(vec![arc(StubAdapter::new("a")), arc(StubAdapter::new("a"))])
        .err()
        .unwrap();
    assert!(matches!(err, TrackError::InvalidArg(msg) if msg.contains("duplicate")));
}

#[test]
fn empty_registry_is_rejected() {
    assert!(ProviderRegistry::new(Vec::new()).is_err());
}

#[test]
fn candidates_preserve_registration_order() {
    let registry = ProviderRegistry::new(vec![
        arc(StubAdapter::new("first")),
        arc(StubAdapter::new("second")),
        arc(StubAdapter::new("third")),
    ])
    .unwrap();

    let ids: Vec<_> = registry
        .candidates_for(TrackingType::Container)
        .map(|(i, a)| (i, a.id().to_string()))
        .collect();
    assert_eq!(
        ids,
        vec![(0, "first".into()), (1, "second".into()), (2, "third".into())]
    );
}

#[test]
fn candidates_filter_type_and_availability() {
    let registry = ProviderRegistry::new(vec![
        arc(StubAdapter::new("bookings-only").only(TrackingTypes::BOOKING)),
        arc(StubAdapter::new("offline").offline()),
        arc(StubAdapter::new("full")),
    ])
    .unwrap();

    let ids: Vec<_> = registry
        .candidates_for(TrackingType::Container)
        .map(|(_, a)| a.id().to_string())
        .collect();
    assert_eq!(ids, vec!["full".to_string()]);

    let ids: Vec<_> = registry
        .candidates_for(TrackingType::Booking)
        .map(|(_, a)| a.id().to_string())
        .collect();
    assert_eq!(ids, vec!["bookings-only".to_string(), "full".to_string()]);
}
