//! Carrier detection from tracking-number prefixes.

use std::collections::HashMap;

use trackline_core::normalize::{looks_like_iso6346, normalize_tracking_number};
use trackline_core::ProviderRegistry;
use trackline_types::{CarrierMatch, MatchSource};

/// Confidence assigned to heuristic (relaxed owner-code) matches.
const HEURISTIC_CONFIDENCE: u8 = 55;

/// Match a tracking number against every registered provider's prefixes.
///
/// One match per carrier (highest confidence wins), ordered by descending
/// confidence with registration order breaking ties. When no prefix matches
/// an ISO 6346 shaped number, a relaxed pass re-matches on the first three
/// letters of each prefix (owner codes vary in their fourth letter across a
/// carrier's fleets).
pub(crate) fn detect(registry: &ProviderRegistry, tracking_number: &str) -> Vec<CarrierMatch> {
    let number = normalize_tracking_number(tracking_number);
    if number.is_empty() {
        return Vec::new();
    }

    let mut matches = pattern_pass(registry, &number);
    if matches.is_empty() && looks_like_iso6346(&number) {
        matches = heuristic_pass(registry, &number);
    }

    // (registration index, match); dedup already happened per carrier.
    matches.sort_by_key(|(reg_idx, m)| (std::cmp::Reverse(m.confidence), *reg_idx));
    matches.into_iter().map(|(_, m)| m).collect()
}

fn pattern_pass(registry: &ProviderRegistry, number: &str) -> Vec<(usize, CarrierMatch)> {
    let mut best: HashMap<&str, (usize, CarrierMatch)> = HashMap::new();
    for (reg_idx, adapter) in registry.iter().enumerate() {
        let profile = adapter.profile();
        for pattern in &profile.prefix_patterns {
            if !number.starts_with(pattern.prefix.as_str()) {
                continue;
            }
            let candidate = CarrierMatch {
                carrier_id: profile.id.clone(),
                confidence: pattern.confidence,
                source: MatchSource::Pattern(pattern.prefix.clone()),
            };
            match best.get(profile.id.as_str()) {
                Some((_, existing)) if existing.confidence >= candidate.confidence => {}
                _ => {
                    best.insert(profile.id.as_str(), (reg_idx, candidate));
                }
            }
        }
    }
    best.into_values().collect()
}

fn heuristic_pass(registry: &ProviderRegistry, number: &str) -> Vec<(usize, CarrierMatch)> {
    let owner = &number[..3];
    let mut out = Vec::new();
    for (reg_idx, adapter) in registry.iter().enumerate() {
        let profile = adapter.profile();
        let hit = profile
            .prefix_patterns
            .iter()
            .any(|p| p.prefix.as_bytes().get(..3) == Some(owner.as_bytes()));
        if hit {
            out.push((
                reg_idx,
                CarrierMatch {
                    carrier_id: profile.id.clone(),
                    confidence: HEURISTIC_CONFIDENCE,
                    source: MatchSource::Heuristic,
                },
            ));
        }
    }
    out
}
