//! Detector, router and fallback executor.

pub(crate) mod backoff;
pub(crate) mod detect;
pub(crate) mod execute;
pub(crate) mod route;
