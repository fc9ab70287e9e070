//! Ordered provider table shared by the detector, router and executor.

use std::sync::Arc;

use trackline_types::TrackingType;

use crate::adapter::CarrierAdapter;
use crate::error::TrackError;

/// Immutable, ordered collection of registered adapters.
///
/// Registration order is significant: it is the tie-break order for
/// detection and routing. Ids are unique; duplicates are rejected at build
/// time rather than shadowing each other at call time.
pub struct ProviderRegistry {
    entries: Vec<Arc<dyn CarrierAdapter>>,
}

impl ProviderRegistry {
    /// Build a registry from adapters in registration order.
    ///
    /// # Errors
    /// Returns `TrackError::InvalidArg` when no adapter is given or two
    /// adapters share an id.
    pub fn new(adapters: Vec<Arc<dyn CarrierAdapter>>) -> Result<Self, TrackError> {
        if adapters.is_empty() {
            return Err(TrackError::invalid_arg("at least one adapter is required"));
        }
        for (i, a) in adapters.iter().enumerate() {
            if adapters[..i].iter().any(|b| b.id() == a.id()) {
                return Err(TrackError::invalid_arg(format!(
                    "duplicate provider id: {}",
                    a.id()
                )));
            }
        }
        Ok(Self { entries: adapters })
    }

    /// Adapters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CarrierAdapter>> {
        self.entries.iter()
    }

    /// Look up an adapter by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn CarrierAdapter>> {
        self.entries.iter().find(|a| a.id() == id)
    }

    /// Adapters eligible for a tracking type: available and supporting it.
    /// Yields `(registration_index, adapter)` so callers can tie-break.
    pub fn candidates_for(
        &self,
        tracking_type: TrackingType,
    ) -> impl Iterator<Item = (usize, &Arc<dyn CarrierAdapter>)> {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, a)| a.available() && a.supports(tracking_type))
    }

    /// Number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty. Always `false` for a built registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
