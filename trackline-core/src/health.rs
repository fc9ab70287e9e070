//! Windowed failure tracking with linear decay.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::ErrorKind;

struct FailureEvent {
    at: Instant,
    #[allow(dead_code)]
    kind: ErrorKind,
}

/// Decaying per-provider failure memory.
///
/// The executor records abandonments and successes; the router reads a
/// penalty. A failure's weight decays linearly over the retention window,
/// the total is capped, and a clean success clears the provider's window.
/// Degraded providers are demoted, never removed.
pub struct FailureTracker {
    window: Duration,
    weight: f64,
    cap: f64,
    inner: Mutex<HashMap<String, VecDeque<FailureEvent>>>,
}

impl FailureTracker {
    /// Create a tracker with the given retention window, per-failure weight
    /// and penalty cap.
    #[must_use]
    pub fn new(window: Duration, weight: f64, cap: f64) -> Self {
        Self {
            window,
            weight,
            cap,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Record a provider abandonment at `now`.
    pub fn record(&self, provider: &str, kind: ErrorKind, now: Instant) {
        let Ok(mut map) = self.inner.lock() else { return };
        let log = map.entry(provider.to_string()).or_default();
        Self::prune(log, self.window, now);
        log.push_back(FailureEvent { at: now, kind });
    }

    /// Record a clean success, clearing the provider's failure window.
    pub fn record_success(&self, provider: &str) {
        let Ok(mut map) = self.inner.lock() else { return };
        map.remove(provider);
    }

    /// Current routing penalty for a provider, in score points.
    #[must_use]
    pub fn penalty(&self, provider: &str, now: Instant) -> f64 {
        let Ok(mut map) = self.inner.lock() else { return 0.0 };
        let Some(log) = map.get_mut(provider) else { return 0.0 };
        Self::prune(log, self.window, now);
        let window_secs = self.window.as_secs_f64();
        let total: f64 = log
            .iter()
            .map(|ev| {
                let age = now.duration_since(ev.at).as_secs_f64();
                self.weight * (1.0 - age / window_secs)
            })
            .sum();
        total.min(self.cap)
    }

    /// Number of failures currently inside the window.
    #[must_use]
    pub fn recent_failures(&self, provider: &str, now: Instant) -> usize {
        let Ok(mut map) = self.inner.lock() else { return 0 };
        let Some(log) = map.get_mut(provider) else { return 0 };
        Self::prune(log, self.window, now);
        log.len()
    }

    fn prune(log: &mut VecDeque<FailureEvent>, window: Duration, now: Instant) {
        while let Some(front) = log.front() {
            if now.duration_since(front.at) >= window {
                log.pop_front();
            } else {
                break;
            }
        }
    }
}
