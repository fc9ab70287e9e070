//! Static provider metadata consumed by the router and the executor.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tracking::{TrackingType, TrackingTypes};

/// Commercial tier of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ProviderTier {
    /// No per-request cost.
    #[default]
    Free,
    /// Free quota with paid overflow.
    Freemium,
    /// Paid per request.
    Premium,
}

/// A tracking-number prefix a carrier is known to issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixPattern {
    /// Prefix matched against the normalized tracking number.
    pub prefix: String,
    /// Detection confidence [0, 100] when the prefix matches.
    pub confidence: u8,
}

/// Request budget limits for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Maximum calls per minute.
    pub per_minute: u32,
    /// Maximum calls per hour.
    pub per_hour: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_minute: 60,
            per_hour: 1_000,
        }
    }
}

/// Immutable description of a tracking data provider.
///
/// Profiles are loaded once at startup and never mutated; everything the
/// router scores on lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Stable provider id, unique within a registry.
    pub id: String,
    /// Human-readable provider name.
    pub display_name: String,
    /// Commercial tier.
    #[serde(default)]
    pub tier: ProviderTier,
    /// Marginal cost of one request, in cents.
    #[serde(default)]
    pub cost_per_request_cents: u32,
    /// Static reliability prior in [0, 1].
    pub base_reliability: f64,
    /// Tracking types this provider can serve.
    pub supported_types: TrackingTypes,
    /// Known carrier prefixes, in declaration order.
    #[serde(default)]
    pub prefix_patterns: Vec<PrefixPattern>,
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Maximum attempts per request (>= 1).
    pub max_retries: u32,
    /// Request budget.
    #[serde(default)]
    pub rate_limit: RateLimit,
}

impl ProviderProfile {
    /// Create a profile with conservative defaults.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            tier: ProviderTier::Free,
            cost_per_request_cents: 0,
            base_reliability: 0.5,
            supported_types: TrackingTypes::all(),
            prefix_patterns: Vec::new(),
            timeout: Duration::from_secs(5),
            max_retries: 2,
            rate_limit: RateLimit::default(),
        }
    }

    /// Set the commercial tier.
    #[must_use]
    pub const fn tier(mut self, tier: ProviderTier) -> Self {
        self.tier = tier;
        self
    }

    /// Set the per-request cost in cents.
    #[must_use]
    pub const fn cost_cents(mut self, cents: u32) -> Self {
        self.cost_per_request_cents = cents;
        self
    }

    /// Set the reliability prior, clamped to [0, 1].
    #[must_use]
    pub fn reliability(mut self, reliability: f64) -> Self {
        self.base_reliability = reliability.clamp(0.0, 1.0);
        self
    }

    /// Restrict the supported tracking types.
    #[must_use]
    pub const fn supported_types(mut self, types: TrackingTypes) -> Self {
        self.supported_types = types;
        self
    }

    /// Register a carrier prefix with its detection confidence.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>, confidence: u8) -> Self {
        self.prefix_patterns.push(PrefixPattern {
            prefix: prefix.into(),
            confidence: confidence.min(100),
        });
        self
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum attempts per request.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the request budget.
    #[must_use]
    pub const fn rate_limit(mut self, limit: RateLimit) -> Self {
        self.rate_limit = limit;
        self
    }

    /// Whether this provider serves the given tracking type.
    #[must_use]
    pub const fn supports(&self, tracking_type: TrackingType) -> bool {
        self.supported_types.supports(tracking_type)
    }
}
