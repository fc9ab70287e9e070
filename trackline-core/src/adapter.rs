//! The uniform leaf contract every tracking data provider implements.

use async_trait::async_trait;

use trackline_types::{ProviderProfile, TrackingRecord, TrackingType};

use crate::error::ProviderError;

/// A tracking data provider.
///
/// Implementations wrap one upstream source (an HTTP API, a fixture set, a
/// middleware stack around another adapter) behind a single `fetch`
/// operation. The engine talks to providers only through this trait.
#[async_trait]
pub trait CarrierAdapter: Send + Sync {
    /// Stable provider id; must equal the profile id and be unique within a
    /// registry.
    fn id(&self) -> &str {
        self.profile().id.as_str()
    }

    /// Static metadata the router scores on.
    fn profile(&self) -> &ProviderProfile;

    /// Whether the adapter is ready to serve requests.
    ///
    /// Providers with missing credentials report `false` and are filtered
    /// out of routing instead of failing at call time.
    fn available(&self) -> bool {
        true
    }

    /// Whether this adapter serves the given tracking type.
    fn supports(&self, tracking_type: TrackingType) -> bool {
        self.profile().supports(tracking_type)
    }

    /// Fetch the current tracking state for a number.
    ///
    /// `tracking_number` is already normalized (trimmed, uppercase).
    /// Implementations classify every failure into a [`ProviderError`];
    /// they never panic on upstream data.
    async fn fetch(
        &self,
        tracking_number: &str,
        tracking_type: TrackingType,
    ) -> Result<TrackingRecord, ProviderError>;
}
