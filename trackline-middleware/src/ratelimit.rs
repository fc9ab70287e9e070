//! Sliding-window rate limiting for carrier adapters.
//!
//! Limits come from the wrapped adapter's profile (`rate_limit.per_minute` /
//! `per_hour`). A blocked call fails locally with `ErrorKind::RateLimit` and
//! a reset hint; the upstream is never contacted.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use trackline_core::{CarrierAdapter, ErrorKind, Middleware, ProviderError};
use trackline_types::{ProviderProfile, TrackingRecord, TrackingType};

struct WindowCount {
    limit: u32,
    window: Duration,
    count: u32,
    started: Instant,
}

impl WindowCount {
    fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            count: 0,
            started: Instant::now(),
        }
    }

    fn roll(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.started);
        if elapsed >= self.window {
            self.count = 0;
            // Advance to the current window boundary so windows stay aligned
            // even across idle gaps.
            let windows_passed = elapsed.as_nanos() / self.window.as_nanos();
            let offset = Duration::from_nanos(
                (windows_passed * self.window.as_nanos())
                    .try_into()
                    .unwrap_or(u64::MAX),
            );
            self.started += offset;
        }
    }

    fn remaining_until_reset(&self, now: Instant) -> Duration {
        self.window.saturating_sub(now.duration_since(self.started))
    }

    fn has_room(&self) -> bool {
        self.count < self.limit
    }
}

struct Windows {
    minute: WindowCount,
    hour: WindowCount,
}

/// Wrapper that enforces the profile's per-minute and per-hour budgets.
pub struct RateLimitedAdapter {
    inner: Arc<dyn CarrierAdapter>,
    windows: Mutex<Windows>,
}

impl RateLimitedAdapter {
    /// Wrap an adapter, reading limits from its profile.
    #[must_use]
    pub fn new(inner: Arc<dyn CarrierAdapter>) -> Self {
        let limit = inner.profile().rate_limit;
        Self::with_windows(
            inner,
            limit.per_minute,
            Duration::from_secs(60),
            limit.per_hour,
            Duration::from_secs(3_600),
        )
    }

    /// Wrap an adapter with explicit window durations.
    ///
    /// Production callers want [`RateLimitedAdapter::new`]; explicit windows
    /// exist so tests can exercise window rollover without waiting a minute.
    #[must_use]
    pub fn with_windows(
        inner: Arc<dyn CarrierAdapter>,
        per_minute: u32,
        minute_window: Duration,
        per_hour: u32,
        hour_window: Duration,
    ) -> Self {
        Self {
            inner,
            windows: Mutex::new(Windows {
                minute: WindowCount::new(per_minute, minute_window),
                hour: WindowCount::new(per_hour, hour_window),
            }),
        }
    }

    fn try_consume(&self, now: Instant) -> Result<(), Duration> {
        let Ok(mut w) = self.windows.lock() else {
            // A poisoned limiter fails open; budgets are advisory.
            return Ok(());
        };
        w.minute.roll(now);
        w.hour.roll(now);
        if !w.minute.has_room() {
            return Err(w.minute.remaining_until_reset(now));
        }
        if !w.hour.has_room() {
            return Err(w.hour.remaining_until_reset(now));
        }
        w.minute.count += 1;
        w.hour.count += 1;
        Ok(())
    }
}

#[async_trait]
impl CarrierAdapter for RateLimitedAdapter {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn profile(&self) -> &ProviderProfile {
        self.inner.profile()
    }

    fn available(&self) -> bool {
        self.inner.available()
    }

    async fn fetch(
        &self,
        tracking_number: &str,
        tracking_type: TrackingType,
    ) -> Result<TrackingRecord, ProviderError> {
        if let Err(reset_in) = self.try_consume(Instant::now()) {
            return Err(ProviderError::new(
                self.id(),
                ErrorKind::RateLimit,
                "local request budget exhausted",
            )
            .with_retry_after(reset_in));
        }
        self.inner.fetch(tracking_number, tracking_type).await
    }
}

/// Middleware config for constructing a [`RateLimitedAdapter`].
pub struct RateLimitLayer;

impl RateLimitLayer {
    /// Create a rate-limit layer; limits are read from the wrapped profile.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for RateLimitLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for RateLimitLayer {
    fn apply(self: Box<Self>, inner: Arc<dyn CarrierAdapter>) -> Arc<dyn CarrierAdapter> {
        Arc::new(RateLimitedAdapter::new(inner))
    }

    fn name(&self) -> &'static str {
        "RateLimitedAdapter"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({ "source": "profile.rate_limit" })
    }
}
