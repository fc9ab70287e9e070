//! Tracking identifier classes and per-request parameters.

use bitflags::bitflags;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The identifier class a tracking number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingType {
    /// ISO 6346 container number (e.g. `MAEU1234567`).
    Container,
    /// Carrier booking reference.
    Booking,
    /// Bill of lading number.
    Bol,
}

impl TrackingType {
    /// Human-readable label used in error messages and reasoning strings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Booking => "booking",
            Self::Bol => "bill of lading",
        }
    }
}

impl std::fmt::Display for TrackingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

bitflags! {
    /// Set of tracking types a provider can serve.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TrackingTypes: u8 {
        /// Container numbers.
        const CONTAINER = 1 << 0;
        /// Booking references.
        const BOOKING = 1 << 1;
        /// Bills of lading.
        const BOL = 1 << 2;
    }
}

impl TrackingTypes {
    /// Whether this set covers the given tracking type.
    #[must_use]
    pub const fn supports(self, tracking_type: TrackingType) -> bool {
        match tracking_type {
            TrackingType::Container => self.contains(Self::CONTAINER),
            TrackingType::Booking => self.contains(Self::BOOKING),
            TrackingType::Bol => self.contains(Self::BOL),
        }
    }

    fn to_vec(self) -> Vec<TrackingType> {
        let mut out = Vec::with_capacity(3);
        if self.contains(Self::CONTAINER) {
            out.push(TrackingType::Container);
        }
        if self.contains(Self::BOOKING) {
            out.push(TrackingType::Booking);
        }
        if self.contains(Self::BOL) {
            out.push(TrackingType::Bol);
        }
        out
    }
}

impl From<TrackingType> for TrackingTypes {
    fn from(t: TrackingType) -> Self {
        match t {
            TrackingType::Container => Self::CONTAINER,
            TrackingType::Booking => Self::BOOKING,
            TrackingType::Bol => Self::BOL,
        }
    }
}

impl FromIterator<TrackingType> for TrackingTypes {
    fn from_iter<I: IntoIterator<Item = TrackingType>>(iter: I) -> Self {
        iter.into_iter().map(Self::from).fold(Self::empty(), |acc, t| acc | t)
    }
}

// Serialized as a list of tracking types so config files stay readable
// (`["container", "booking"]` instead of raw bits).
impl Serialize for TrackingTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let items = self.to_vec();
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&item)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for TrackingTypes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TypesVisitor;

        impl<'de> Visitor<'de> for TypesVisitor {
            type Value = TrackingTypes;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a sequence of tracking types")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut flags = TrackingTypes::empty();
                while let Some(t) = seq.next_element::<TrackingType>()? {
                    flags |= TrackingTypes::from(t);
                }
                Ok(flags)
            }
        }

        deserializer.deserialize_seq(TypesVisitor)
    }
}

/// Subscription tier of the end user issuing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum UserTier {
    /// Free users are routed with amplified cost pressure.
    #[default]
    Free,
    /// Paying users; cost is a soft signal only.
    Premium,
    /// Enterprise users; cost is a soft signal only.
    Enterprise,
}

/// A single tracking request as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRequest {
    /// Raw tracking number as supplied by the caller.
    pub tracking_number: String,
    /// Identifier class the caller asserts the number belongs to.
    pub tracking_type: TrackingType,
    /// Tier of the requesting user.
    #[serde(default)]
    pub user_tier: UserTier,
    /// Explicit request to prefer cheaper providers.
    #[serde(default)]
    pub cost_optimize: bool,
}

impl TrackingRequest {
    /// Create a request with default tier (`Free`) and no cost-optimize flag.
    #[must_use]
    pub fn new(tracking_number: impl Into<String>, tracking_type: TrackingType) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            tracking_type,
            user_tier: UserTier::default(),
            cost_optimize: false,
        }
    }

    /// Set the user tier.
    #[must_use]
    pub fn user_tier(mut self, tier: UserTier) -> Self {
        self.user_tier = tier;
        self
    }

    /// Prefer cheaper providers regardless of tier.
    #[must_use]
    pub const fn cost_optimize(mut self, on: bool) -> Self {
        self.cost_optimize = on;
        self
    }

    /// Tracking number normalized for matching: trimmed, uppercased.
    #[must_use]
    pub fn normalized_number(&self) -> String {
        self.tracking_number.trim().to_ascii_uppercase()
    }

    /// Whether routing should apply amplified cost pressure.
    #[must_use]
    pub fn cost_sensitive(&self) -> bool {
        self.cost_optimize || self.user_tier == UserTier::Free
    }
}
