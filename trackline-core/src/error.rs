//! Unified error types for the trackline workspace.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use trackline_types::TrackingType;

/// Classification of a single provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Credentials rejected (401/403). Retrying cannot help.
    AuthError,
    /// The provider does not know the tracking number.
    NotFound,
    /// Request budget exhausted upstream; may carry a retry-after hint.
    RateLimit,
    /// The attempt exceeded its time budget.
    Timeout,
    /// Connection-level failure (DNS, TLS, reset).
    Network,
    /// The provider answered but the payload or status was unusable.
    InvalidResponse,
    /// The provider does not serve this tracking type.
    Unsupported,
}

impl ErrorKind {
    /// Stable lowercase label for logs and reasoning strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthError => "auth_error",
            Self::NotFound => "not_found",
            Self::RateLimit => "rate_limit",
            Self::Timeout => "timeout",
            Self::Network => "network_error",
            Self::InvalidResponse => "invalid_response",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a single carrier adapter call.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{provider} failed ({kind}): {message}")]
pub struct ProviderError {
    /// Id of the provider that failed.
    pub provider: String,
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable detail.
    pub message: String,
    /// HTTP status, when the failure came from an HTTP response.
    pub status: Option<u16>,
    /// Upstream retry-after hint, when the provider supplied one.
    pub retry_after: Option<Duration>,
}

impl ProviderError {
    /// Create a provider error with no status or retry hint.
    #[must_use]
    pub fn new(provider: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            kind,
            message: message.into(),
            status: None,
            retry_after: None,
        }
    }

    /// Attach the HTTP status that produced this error.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach an upstream retry-after hint.
    #[must_use]
    pub const fn with_retry_after(mut self, after: Duration) -> Self {
        self.retry_after = Some(after);
        self
    }

    /// Shorthand for an attempt-timeout error.
    #[must_use]
    pub fn timeout(provider: impl Into<String>) -> Self {
        Self::new(provider, ErrorKind::Timeout, "attempt exceeded its time budget")
    }

    /// Shorthand for an unsupported-tracking-type error.
    #[must_use]
    pub fn unsupported(provider: impl Into<String>, tracking_type: TrackingType) -> Self {
        Self::new(
            provider,
            ErrorKind::Unsupported,
            format!("{tracking_type} tracking not supported"),
        )
    }

    /// Whether another attempt against the same provider could succeed.
    ///
    /// Timeouts, network failures and rate limits are transient. An invalid
    /// response is retryable only when it was a server-side (5xx) failure;
    /// a malformed 2xx payload will be malformed again.
    #[must_use]
    pub fn retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Timeout | ErrorKind::Network | ErrorKind::RateLimit => true,
            ErrorKind::InvalidResponse => self.status.is_some_and(|s| s >= 500),
            ErrorKind::AuthError | ErrorKind::NotFound | ErrorKind::Unsupported => false,
        }
    }
}

/// One abandoned provider in the attempt ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAttempt {
    /// Provider id.
    pub provider: String,
    /// Kind of the error the provider was abandoned with.
    pub kind: ErrorKind,
    /// How many calls were made before abandoning.
    pub calls: u32,
}

/// Terminal error of a `track` call.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TrackError {
    /// No registered provider was eligible for the request.
    #[error("no eligible providers for {tracking_type} tracking")]
    NoCandidates {
        /// Label of the requested tracking type.
        tracking_type: String,
    },

    /// Every eligible provider was tried and failed.
    #[error("all providers failed ({n} attempted, last: {last})", n = attempts.len())]
    AllProvidersFailed {
        /// Per-provider abandonment ledger, in execution order.
        attempts: Vec<ProviderAttempt>,
        /// The error that ended the walk.
        last: ProviderError,
    },

    /// The overall deadline expired before any provider could be attempted.
    #[error("request deadline exceeded before any provider responded")]
    RequestTimeout,

    /// Invalid input or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl TrackError {
    /// Build a `NoCandidates` error for a tracking type.
    #[must_use]
    pub fn no_candidates(tracking_type: TrackingType) -> Self {
        Self::NoCandidates {
            tracking_type: tracking_type.label().to_string(),
        }
    }

    /// Build an `InvalidArg` error.
    #[must_use]
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Number of providers that were actually attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        match self {
            Self::AllProvidersFailed { attempts, .. } => attempts.len(),
            _ => 0,
        }
    }
}
