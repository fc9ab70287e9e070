//! trackline-http
//!
//! Generic carrier adapter that implements `CarrierAdapter` over any
//! JSON-speaking carrier or aggregator API. One [`CarrierApiConfig`] per
//! upstream supplies the base URL, endpoint templates, auth header and the
//! normalization lookup tables; no per-carrier code is needed.
#![warn(missing_docs)]

mod adapter;
mod config;
mod wire;

pub use adapter::HttpCarrierAdapter;
pub use config::{CarrierApiConfig, EndpointMap, RegistryConfig};
