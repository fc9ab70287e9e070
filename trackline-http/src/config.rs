//! Per-carrier API configuration and the top-level registry config.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use trackline_core::{CarrierAdapter, TrackError};
use trackline_types::{ProviderProfile, ShipmentStatus, TrackingType};

use crate::adapter::HttpCarrierAdapter;

/// Endpoint path templates per tracking type.
///
/// Templates contain a `{number}` placeholder, e.g.
/// `/v1/containers/{number}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMap {
    /// Container tracking endpoint.
    pub container: String,
    /// Booking tracking endpoint.
    pub booking: String,
    /// Bill-of-lading tracking endpoint.
    pub bol: String,
}

impl EndpointMap {
    /// Template for the given tracking type.
    #[must_use]
    pub fn for_type(&self, tracking_type: TrackingType) -> &str {
        match tracking_type {
            TrackingType::Container => &self.container,
            TrackingType::Booking => &self.booking,
            TrackingType::Bol => &self.bol,
        }
    }
}

/// Everything needed to talk to one upstream carrier API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierApiConfig {
    /// Routing/scoring metadata for this provider.
    pub profile: ProviderProfile,
    /// Base URL of the upstream API.
    pub base_url: String,
    /// Header carrying the API key; `None` for unauthenticated APIs.
    #[serde(default)]
    pub auth_header: Option<String>,
    /// Credential value, typically injected from the environment by the
    /// config loader. `None` with `auth_header` set marks the provider
    /// unavailable rather than failing at call time.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Endpoint templates per tracking type.
    pub endpoints: EndpointMap,
    /// Carrier status string -> canonical status. Keys are matched after
    /// uppercasing and `_`-normalization.
    #[serde(default)]
    pub status_map: HashMap<String, ShipmentStatus>,
    /// Carrier event code -> normalized event label.
    #[serde(default)]
    pub event_map: HashMap<String, String>,
    /// Location name or UN/LOCODE -> IANA timezone, for carriers that report
    /// naive local timestamps.
    #[serde(default)]
    pub port_timezones: HashMap<String, String>,
}

/// Startup configuration: every HTTP carrier the deployment talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// One entry per upstream, in priority (registration) order.
    pub carriers: Vec<CarrierApiConfig>,
}

impl RegistryConfig {
    /// Build one adapter per configured carrier, in declaration order.
    ///
    /// # Errors
    /// Returns `TrackError::InvalidArg` when a base URL does not parse or
    /// the HTTP client cannot be constructed.
    pub fn adapters(&self) -> Result<Vec<Arc<dyn CarrierAdapter>>, TrackError> {
        self.carriers
            .iter()
            .map(|cfg| {
                let adapter = HttpCarrierAdapter::new(cfg.clone())?;
                Ok(Arc::new(adapter) as Arc<dyn CarrierAdapter>)
            })
            .collect()
    }
}
