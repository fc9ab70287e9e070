//! Derived routing artifacts: carrier matches and scored candidate lists.
//!
//! Both are recomputed per request and deterministic for identical inputs;
//! they exist as plain data so callers can log or assert on them.

use serde::{Deserialize, Serialize};

/// How a carrier match was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// A registered prefix matched exactly; carries the matching prefix.
    Pattern(String),
    /// Relaxed owner-code match on an ISO 6346 shaped number.
    Heuristic,
}

/// One carrier the detector considers a plausible owner of a tracking number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierMatch {
    /// Id of the matched carrier's provider.
    pub carrier_id: String,
    /// Detection confidence [0, 100].
    pub confidence: u8,
    /// Where the match came from.
    pub source: MatchSource,
}

/// A scored provider in a routing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Provider id.
    pub provider_id: String,
    /// Composite routing score; higher is tried first.
    pub score: f64,
    /// Human-readable explanation of the score.
    pub reasoning: String,
}

/// Ordered list of providers the executor will walk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Candidates in descending score order; ties keep registration order.
    pub candidates: Vec<RouteCandidate>,
}

impl RoutingDecision {
    /// Whether any provider is eligible for the request.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Provider ids in execution order.
    #[must_use]
    pub fn provider_ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.provider_id.as_str()).collect()
    }
}
