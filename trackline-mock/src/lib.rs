//! Scriptable in-memory carrier adapter for tests and examples.
//!
//! [`MockAdapter`] serves a scripted sequence of outcomes (then falls back
//! to a default outcome), counts calls, and can simulate latency and
//! missing credentials.
#![warn(missing_docs)]

mod fixtures;

pub use fixtures::{delivered_record, in_transit_record};

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use trackline_core::{CarrierAdapter, ErrorKind, ProviderError};
use trackline_types::{ProviderProfile, TrackingRecord, TrackingType};

type Outcome = Result<TrackingRecord, ProviderError>;

/// In-memory adapter with scripted outcomes and call accounting.
pub struct MockAdapter {
    profile: ProviderProfile,
    script: Mutex<VecDeque<Outcome>>,
    fallback: Option<Outcome>,
    delay: Duration,
    available: bool,
    calls: AtomicUsize,
}

impl MockAdapter {
    /// Start building a mock with the given provider id.
    #[must_use]
    pub fn builder(id: &str) -> MockAdapterBuilder {
        MockAdapterBuilder {
            profile: ProviderProfile::new(id, id),
            script: VecDeque::new(),
            fallback: None,
            delay: Duration::ZERO,
            available: true,
        }
    }

    /// Number of `fetch` calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self, tracking_number: &str) -> Outcome {
        if let Ok(mut script) = self.script.lock()
            && let Some(outcome) = script.pop_front()
        {
            return outcome;
        }
        if let Some(fallback) = &self.fallback {
            return fallback.clone();
        }
        Err(ProviderError::new(
            self.id(),
            ErrorKind::NotFound,
            format!("no scripted outcome for {tracking_number}"),
        ))
    }
}

#[async_trait]
impl CarrierAdapter for MockAdapter {
    fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    fn available(&self) -> bool {
        self.available
    }

    async fn fetch(
        &self,
        tracking_number: &str,
        _tracking_type: TrackingType,
    ) -> Result<TrackingRecord, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.next_outcome(tracking_number)
    }
}

/// Builder for [`MockAdapter`].
pub struct MockAdapterBuilder {
    profile: ProviderProfile,
    script: VecDeque<Outcome>,
    fallback: Option<Outcome>,
    delay: Duration,
    available: bool,
}

impl MockAdapterBuilder {
    /// Replace the whole provider profile.
    #[must_use]
    pub fn profile(mut self, profile: ProviderProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Push a scripted success.
    #[must_use]
    pub fn then_record(mut self, record: TrackingRecord) -> Self {
        self.script.push_back(Ok(record));
        self
    }

    /// Push a scripted failure.
    #[must_use]
    pub fn then_error(mut self, error: ProviderError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    /// Push a scripted failure of the given kind, tagged with this mock's id.
    #[must_use]
    pub fn then_fails(mut self, kind: ErrorKind) -> Self {
        let err = ProviderError::new(self.profile.id.clone(), kind, "scripted failure");
        self.script.push_back(Err(err));
        self
    }

    /// Outcome served once the script is exhausted.
    #[must_use]
    pub fn default_record(mut self, record: TrackingRecord) -> Self {
        self.fallback = Some(Ok(record));
        self
    }

    /// Failure served once the script is exhausted.
    #[must_use]
    pub fn default_fails(mut self, kind: ErrorKind) -> Self {
        let err = ProviderError::new(self.profile.id.clone(), kind, "scripted failure");
        self.fallback = Some(Err(err));
        self
    }

    /// Sleep this long inside every `fetch` call.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Report the adapter as unavailable (e.g. missing credentials).
    #[must_use]
    pub const fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Finish the build.
    #[must_use]
    pub fn build(self) -> MockAdapter {
        MockAdapter {
            profile: self.profile,
            script: Mutex::new(self.script),
            fallback: self.fallback,
            delay: self.delay,
            available: self.available,
            calls: AtomicUsize::new(0),
        }
    }
}
