//! Sequential fallback walk with bounded retries.

use std::time::Instant as StdInstant;

use tokio::time::Instant;

use trackline_core::{
    FailureTracker, ProviderAttempt, ProviderError, ProviderRegistry, TrackError,
};
use trackline_types::{EngineConfig, RoutingDecision, TrackingRecord, TrackingRequest};

use super::backoff::backoff_delay;

/// Walk the decision's candidates in order until one yields a record.
///
/// Per provider: up to `max_retries` attempts, each bounded by the minimum
/// of the profile timeout and the remaining overall deadline. Non-retryable
/// errors abandon the provider immediately. Every abandonment is recorded in
/// the failure tracker and the attempt ledger; the first success records a
/// tracker success and returns.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub(crate) async fn execute(
    registry: &ProviderRegistry,
    health: &FailureTracker,
    cfg: &EngineConfig,
    decision: &RoutingDecision,
    req: &TrackingRequest,
) -> Result<TrackingRecord, TrackError> {
    if decision.is_empty() {
        return Err(TrackError::no_candidates(req.tracking_type));
    }

    let number = req.normalized_number();
    let deadline = Instant::now() + cfg.request_deadline;
    let mut attempts: Vec<ProviderAttempt> = Vec::new();
    let mut last: Option<ProviderError> = None;

    'providers: for candidate in &decision.candidates {
        let Some(adapter) = registry.get(&candidate.provider_id) else {
            continue;
        };
        let profile = adapter.profile();
        let max_attempts = profile.max_retries.max(1);

        let mut calls = 0u32;
        for attempt in 1..=max_attempts {
            let now = Instant::now();
            if now >= deadline {
                // Out of overall budget mid-provider: abandon with whatever
                // this provider failed with so far.
                if calls > 0 && let Some(err) = &last {
                    health.record(adapter.id(), err.kind, StdInstant::now());
                    attempts.push(ProviderAttempt {
                        provider: adapter.id().to_string(),
                        kind: err.kind,
                        calls,
                    });
                }
                break 'providers;
            }
            let budget = profile.timeout.min(deadline - now);

            calls += 1;
            let outcome =
                tokio::time::timeout(budget, adapter.fetch(&number, req.tracking_type)).await;
            let err = match outcome {
                Ok(Ok(record)) => {
                    health.record_success(adapter.id());
                    return Ok(record);
                }
                Ok(Err(e)) => e,
                Err(_) => ProviderError::timeout(adapter.id()),
            };

            let abandon = !err.retryable() || attempt == max_attempts;
            if abandon {
                health.record(adapter.id(), err.kind, StdInstant::now());
                attempts.push(ProviderAttempt {
                    provider: adapter.id().to_string(),
                    kind: err.kind,
                    calls,
                });
                last = Some(err);
                continue 'providers;
            }

            let delay = match err.retry_after {
                Some(after) => after,
                None if err.kind == trackline_core::ErrorKind::RateLimit => {
                    cfg.rate_limit_fallback
                }
                None => backoff_delay(&cfg.backoff, attempt),
            };
            last = Some(err);
            // Sleeping past the deadline is pointless; the next loop turn
            // would bail anyway, so clamp to the remaining budget.
            let remaining = deadline.saturating_duration_since(Instant::now());
            tokio::time::sleep(delay.min(remaining)).await;
        }
    }

    match last {
        Some(last) if !attempts.is_empty() => {
            Err(TrackError::AllProvidersFailed { attempts, last })
        }
        _ => Err(TrackError::RequestTimeout),
    }
}
