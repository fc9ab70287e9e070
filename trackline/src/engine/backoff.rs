use std::time::Duration;

use rand::Rng;

use trackline_types::BackoffConfig;

/// Delay before retry number `attempt` (1-based: attempt 1 just ran).
///
/// base * factor^(attempt-1), capped, plus up to `jitter_percent` of the
/// capped value. With factor >= 2 the jittered sequence stays
/// non-decreasing.
pub(crate) fn backoff_delay(cfg: &BackoffConfig, attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    let base = cfg
        .base_delay_ms
        .saturating_mul(u64::from(cfg.factor.max(1)).saturating_pow(exp));
    let capped = base.min(cfg.max_delay_ms);
    Duration::from_millis(jittered(capped, cfg.jitter_percent))
}

fn jittered(base_ms: u64, jitter_percent: u8) -> u64 {
    if jitter_percent == 0 {
        return base_ms;
    }
    let range = std::cmp::max(1, base_ms.saturating_mul(u64::from(jitter_percent)) / 100);
    let mut rng = rand::rng();
    base_ms + rng.random_range(0..range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(jitter: u8) -> BackoffConfig {
        BackoffConfig {
            base_delay_ms: 250,
            max_delay_ms: 3_000,
            factor: 2,
            jitter_percent: jitter,
        }
    }

    #[test]
    fn doubles_until_the_cap() {
        let cfg = cfg(0);
        assert_eq!(backoff_delay(&cfg, 1), Duration::from_millis(250));
        assert_eq!(backoff_delay(&cfg, 2), Duration::from_millis(500));
        assert_eq!(backoff_delay(&cfg, 3), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(&cfg, 5), Duration::from_millis(3_000));
        assert_eq!(backoff_delay(&cfg, 30), Duration::from_millis(3_000));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let cfg = cfg(20);
        for _ in 0..100 {
            let d = backoff_delay(&cfg, 2).as_millis() as u64;
            assert!((500..600).contains(&d), "got {d}ms");
        }
    }
}
