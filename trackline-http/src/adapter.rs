//! The generic HTTP carrier adapter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use trackline_core::normalize::{map_status, parse_container_code};
use trackline_core::{CarrierAdapter, ErrorKind, ProviderError, TrackError};
use trackline_middleware::AdapterBuilder;
use trackline_types::{
    CacheConfig, Container, Port, ProviderProfile, Route, ServiceType, TimelineEvent,
    TrackingRecord, TrackingType, VesselInfo,
};

use crate::config::CarrierApiConfig;
use crate::wire::{RawEvent, RawRoute, RawTrackingResponse};

/// `CarrierAdapter` over a JSON-speaking carrier or aggregator API.
///
/// All carrier-specific knowledge lives in the [`CarrierApiConfig`]; the
/// adapter itself only knows how to call, classify and normalize.
pub struct HttpCarrierAdapter {
    config: CarrierApiConfig,
    base: Url,
    client: Client,
}

impl HttpCarrierAdapter {
    /// Construct an adapter from its carrier configuration.
    ///
    /// # Errors
    /// Returns `TrackError::InvalidArg` when the base URL does not parse or
    /// the HTTP client cannot be built.
    pub fn new(config: CarrierApiConfig) -> Result<Self, TrackError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| TrackError::invalid_arg(format!("invalid base url: {e}")))?;
        let client = Client::builder()
            .build()
            .map_err(|e| TrackError::invalid_arg(format!("http client: {e}")))?;
        Ok(Self {
            config,
            base,
            client,
        })
    }

    /// Adapter wrapped with the profile's rate limit and a success cache.
    ///
    /// # Errors
    /// Propagates construction errors from [`HttpCarrierAdapter::new`].
    pub fn rate_limited(
        config: CarrierApiConfig,
        cache: CacheConfig,
    ) -> Result<Arc<dyn CarrierAdapter>, TrackError> {
        let raw: Arc<dyn CarrierAdapter> = Arc::new(Self::new(config)?);
        AdapterBuilder::new(raw)
            .with_rate_limit()
            .with_cache(cache)
            .build()
    }

    fn request_url(&self, number: &str, tracking_type: TrackingType) -> Result<Url, ProviderError> {
        let path = self
            .config
            .endpoints
            .for_type(tracking_type)
            .replace("{number}", number);
        self.base.join(path.trim_start_matches('/')).map_err(|e| {
            ProviderError::new(
                self.id(),
                ErrorKind::InvalidResponse,
                format!("endpoint template produced an invalid url: {e}"),
            )
        })
    }

    fn classify_send_error(&self, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            return ProviderError::timeout(self.id());
        }
        ProviderError::new(self.id(), ErrorKind::Network, err.to_string())
    }

    fn classify_status(&self, response: &Response) -> Option<ProviderError> {
        let status = response.status();
        if status.is_success() {
            return None;
        }
        let id = self.id();
        let err = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::new(id, ErrorKind::AuthError, "credentials rejected")
            }
            StatusCode::NOT_FOUND => {
                ProviderError::new(id, ErrorKind::NotFound, "tracking number unknown")
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let mut err =
                    ProviderError::new(id, ErrorKind::RateLimit, "upstream request budget exhausted");
                if let Some(after) = retry_after_seconds(response) {
                    err = err.with_retry_after(after);
                }
                err
            }
            s if s.is_server_error() => {
                ProviderError::new(id, ErrorKind::InvalidResponse, "upstream server error")
            }
            _ => ProviderError::new(id, ErrorKind::InvalidResponse, "unexpected response status"),
        };
        Some(err.with_status(status.as_u16()))
    }

    fn normalize(&self, raw: RawTrackingResponse, number: &str) -> TrackingRecord {
        let profile = &self.config.profile;
        let status = map_status(
            &self.config.status_map,
            raw.status.as_deref().unwrap_or("UNKNOWN"),
        );

        let timeline: Vec<TimelineEvent> = raw
            .events
            .into_iter()
            .enumerate()
            .filter_map(|(i, ev)| self.normalize_event(ev, i))
            .collect();

        let containers: Vec<Container> = raw
            .containers
            .into_iter()
            .map(|c| {
                let (size, container_type) = c
                    .code
                    .as_deref()
                    .map_or((None, None), parse_container_code);
                Container {
                    number: c.number,
                    size,
                    container_type,
                }
            })
            .collect();

        let vessel = raw.vessel.and_then(|v| {
            v.name.map(|name| VesselInfo {
                name,
                imo: v.imo,
                voyage: v.voyage,
            })
        });

        TrackingRecord {
            tracking_number: raw
                .tracking_number
                .unwrap_or_else(|| number.to_string()),
            carrier_name: raw.carrier.unwrap_or_else(|| profile.display_name.clone()),
            service: raw.service.as_deref().and_then(parse_service),
            status,
            timeline,
            containers,
            vessel,
            route: raw.route.and_then(normalize_route),
            last_updated: Utc::now(),
            source_provider: profile.id.clone(),
            reliability: profile.base_reliability,
        }
    }

    fn normalize_event(&self, ev: RawEvent, index: usize) -> Option<TimelineEvent> {
        // Events without a usable timestamp carry no timeline information.
        let timestamp = self.parse_event_time(&ev)?;

        let label = ev
            .code
            .as_deref()
            .and_then(|code| self.config.event_map.get(code).map(String::as_str))
            .or(ev.status.as_deref())
            .or(ev.code.as_deref())
            .unwrap_or("UNKNOWN");

        Some(TimelineEvent {
            id: ev.id.unwrap_or_else(|| format!("evt-{index}")),
            timestamp,
            status: map_status(&self.config.status_map, label),
            location: ev.location.unwrap_or_default(),
            description: ev.description.unwrap_or_default(),
            is_completed: ev.completed.unwrap_or(true),
            lat: ev.lat,
            lng: ev.lng,
        })
    }

    fn parse_event_time(&self, ev: &RawEvent) -> Option<DateTime<Utc>> {
        let raw = ev.timestamp.as_deref()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        // Naive local timestamp; resolve through the port-timezone table,
        // defaulting to UTC when the location is unknown.
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()?;
        let tz = ev
            .location
            .as_deref()
            .and_then(|loc| self.config.port_timezones.get(loc))
            .and_then(|name| name.parse::<Tz>().ok());
        match tz {
            Some(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|ts| ts.with_timezone(&Utc)),
            None => Some(Utc.from_utc_datetime(&naive)),
        }
    }
}

#[async_trait]
impl CarrierAdapter for HttpCarrierAdapter {
    fn profile(&self) -> &ProviderProfile {
        &self.config.profile
    }

    fn available(&self) -> bool {
        self.config.auth_header.is_none() || self.config.api_key.is_some()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), fields(provider = %self.id()))
    )]
    async fn fetch(
        &self,
        tracking_number: &str,
        tracking_type: TrackingType,
    ) -> Result<TrackingRecord, ProviderError> {
        if !self.supports(tracking_type) {
            return Err(ProviderError::unsupported(self.id(), tracking_type));
        }

        let url = self.request_url(tracking_number, tracking_type)?;
        let mut request = self
            .client
            .get(url)
            .timeout(self.config.profile.timeout);
        if let (Some(header), Some(key)) = (&self.config.auth_header, &self.config.api_key) {
            request = request.header(header.as_str(), key.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.classify_send_error(&e))?;
        if let Some(err) = self.classify_status(&response) {
            return Err(err);
        }

        let status = response.status().as_u16();
        let raw: RawTrackingResponse = response.json().await.map_err(|e| {
            ProviderError::new(
                self.id(),
                ErrorKind::InvalidResponse,
                format!("payload did not parse: {e}"),
            )
            .with_status(status)
        })?;

        Ok(self.normalize(raw, tracking_number))
    }
}

fn parse_service(raw: &str) -> Option<ServiceType> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "FCL" => Some(ServiceType::Fcl),
        "LCL" => Some(ServiceType::Lcl),
        _ => None,
    }
}

fn normalize_route(raw: RawRoute) -> Option<Route> {
    let port = |p: crate::wire::RawPort| {
        p.name.map(|name| Port {
            name,
            locode: p.locode,
        })
    };
    let origin = raw.origin.and_then(port)?;
    let destination = raw.destination.and_then(port)?;
    Some(Route {
        origin,
        destination,
        stops: raw.stops.into_iter().filter_map(port).collect(),
    })
}

fn retry_after_seconds(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
