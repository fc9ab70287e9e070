//! Middleware wrappers for Trackline carrier adapters.
//!
//! Two concerns live here: response caching (per-adapter wrapper plus an
//! engine-level [`trackline_core::ResponseCache`] implementation) and
//! sliding-window rate limiting. [`AdapterBuilder`] composes them around a
//! raw adapter with ordering validation.
#![warn(missing_docs)]

mod builder;
mod cache;
mod ratelimit;

pub use builder::AdapterBuilder;
pub use cache::{CacheLayer, CachingAdapter, MokaResponseCache};
pub use ratelimit::{RateLimitLayer, RateLimitedAdapter};
