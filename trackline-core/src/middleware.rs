//! Middleware trait for wrapping `CarrierAdapter` implementations.

use std::sync::Arc;

use crate::adapter::CarrierAdapter;

/// Trait implemented by adapter middleware layers.
///
/// A middleware consumes an inner `CarrierAdapter` and returns a wrapped
/// adapter that augments or restricts behavior (e.g., caching, rate limits).
pub trait Middleware: Send + Sync {
    /// Apply this middleware to wrap an inner adapter and return the wrapped adapter.
    fn apply(self: Box<Self>, inner: Arc<dyn CarrierAdapter>) -> Arc<dyn CarrierAdapter>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
