//! Configuration for the engine, retry backoff and the response cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Exponential backoff configuration for retries within one provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the second attempt, in milliseconds.
    pub base_delay_ms: u64,
    /// Ceiling on any single delay, in milliseconds.
    pub max_delay_ms: u64,
    /// Exponential factor applied per attempt (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 250,
            max_delay_ms: 3_000,
            factor: 2,
            jitter_percent: 10,
        }
    }
}

/// Knobs for the routing score and the fallback walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Overall wall-clock budget for one `track` call, across all providers.
    pub request_deadline: Duration,
    /// Retry backoff within a single provider.
    pub backoff: BackoffConfig,
    /// Wait applied on a rate-limited response without a retry-after hint.
    pub rate_limit_fallback: Duration,
    /// How long a recorded failure keeps influencing routing.
    pub failure_window: Duration,
    /// Score points one fresh failure costs a provider.
    pub failure_weight: f64,
    /// Ceiling on the total failure penalty.
    pub failure_penalty_cap: f64,
    /// Weight of the carrier-affinity bonus per confidence point.
    pub affinity_weight: f64,
    /// Score relief scaled by 1 / (1 + cost_cents); rewards cheap providers
    /// even when the request is not cost sensitive.
    pub cost_relief_weight: f64,
    /// Score subtracted per cent of request cost on cost-sensitive requests.
    /// Sized to dominate affinity and penalty so cheaper always wins.
    pub cost_pressure_per_cent: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_deadline: Duration::from_secs(25),
            backoff: BackoffConfig::default(),
            rate_limit_fallback: Duration::from_secs(60),
            failure_window: Duration::from_secs(600),
            failure_weight: 10.0,
            failure_penalty_cap: 40.0,
            affinity_weight: 0.5,
            cost_relief_weight: 20.0,
            cost_pressure_per_cent: 100.0,
        }
    }
}

/// Configuration for a TTL'd response cache.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time to live per entry.
    pub ttl: Duration,
    /// Maximum number of cached records.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(120),
            max_entries: 10_000,
        }
    }
}
