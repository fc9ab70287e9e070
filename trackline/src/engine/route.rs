//! Deterministic provider scoring.

use std::fmt::Write as _;
use std::time::Instant;

use trackline_core::{FailureTracker, ProviderRegistry};
use trackline_types::{
    CarrierMatch, EngineConfig, ProviderProfile, RouteCandidate, RoutingDecision, TrackingRequest,
};

/// Score every eligible provider and order them best first.
///
/// Eligibility: available and supporting the request's tracking type.
/// Score = reliability (0-100) + cost relief + affinity bonus - failure
/// penalty, minus an amplified cost pressure on cost-sensitive requests.
/// Stable sort; ties keep registration order. No randomness.
pub(crate) fn route(
    registry: &ProviderRegistry,
    health: &FailureTracker,
    cfg: &EngineConfig,
    req: &TrackingRequest,
    matches: &[CarrierMatch],
    now: Instant,
) -> RoutingDecision {
    let cost_sensitive = req.cost_sensitive();

    let mut scored: Vec<(usize, RouteCandidate)> = registry
        .candidates_for(req.tracking_type)
        .map(|(reg_idx, adapter)| {
            let profile = adapter.profile();
            let affinity = matches
                .iter()
                .find(|m| m.carrier_id == profile.id)
                .map(|m| m.confidence);
            let candidate = score(cfg, health, profile, affinity, cost_sensitive, now);
            (reg_idx, candidate)
        })
        .collect();

    scored.sort_by(|(ia, a), (ib, b)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| ia.cmp(ib))
    });

    RoutingDecision {
        candidates: scored.into_iter().map(|(_, c)| c).collect(),
    }
}

fn score(
    cfg: &EngineConfig,
    health: &FailureTracker,
    profile: &ProviderProfile,
    affinity: Option<u8>,
    cost_sensitive: bool,
    now: Instant,
) -> RouteCandidate {
    let cents = f64::from(profile.cost_per_request_cents);
    let reliability = profile.base_reliability * 100.0;
    let relief = cfg.cost_relief_weight / (1.0 + cents);
    let bonus = affinity.map_or(0.0, |c| cfg.affinity_weight * f64::from(c));
    let penalty = health.penalty(&profile.id, now);
    let pressure = if cost_sensitive {
        cfg.cost_pressure_per_cent * cents
    } else {
        0.0
    };

    let score = reliability + relief + bonus - penalty - pressure;

    let mut reasoning = format!("reliability {reliability:.0}");
    if cost_sensitive {
        let _ = write!(
            reasoning,
            ", cost-optimized: {}c per request",
            profile.cost_per_request_cents
        );
    } else if profile.cost_per_request_cents > 0 {
        let _ = write!(reasoning, ", cost {}c", profile.cost_per_request_cents);
    }
    if let Some(confidence) = affinity {
        let _ = write!(reasoning, ", carrier match ({confidence} confidence)");
    }
    if penalty > 0.0 {
        let _ = write!(reasoning, ", recent failures (-{penalty:.1})");
    }

    RouteCandidate {
        provider_id: profile.id.clone(),
        score,
        reasoning,
    }
}
