//! # Device Location
//!
//! Desktop stand-in for browser geolocation: an IP geolocation lookup behind the
//! [`Locator`] trait, wrapped by [`resolve_location`] which applies the bounded
//! wait and the fixed fallback coordinate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinates, ResolvedLocation};

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::geo::Geocoder;
use crate::http::{build_client, get_json};

/// Bounded wait for dashboard, weather and chat lookups.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounded wait used by the farm map.
pub const MAP_LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates>;
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

pub struct IpLocator {
    client: Client,
    url: String,
}

impl IpLocator {
    pub fn new(config: &Config) -> Self {
        Self {
            client: build_client(config.http_timeout()),
            url: config.ip_geolocation_url.clone(),
        }
    }
}

#[async_trait]
impl Locator for IpLocator {
    #[tracing::instrument(skip(self))]
    async fn locate(&self) -> Result<Coordinates> {
        let lookup: IpLookup = get_json(&self.client, &self.url, &[]).await?;
        match (lookup.latitude, lookup.longitude) {
            (Some(lat), Some(lon)) => {
                let coords = Coordinates::new(lat, lon);
                if coords.is_valid() {
                    Ok(coords)
                } else {
                    Err(CoreError::Decode(format!("out of range position {lat},{lon}")))
                }
            }
            _ => Err(CoreError::NotFound("position unavailable".to_string())),
        }
    }
}

/// Try the locator within `timeout`.
///
/// Returns `None` when location is disabled, denied, unavailable or too slow.
pub async fn try_locate(
    locator: &dyn Locator,
    enabled: bool,
    timeout: Duration,
) -> Option<Coordinates> {
    if !enabled {
        tracing::debug!("Location disabled by user");
        return None;
    }

    match tokio::time::timeout(timeout, locator.locate()).await {
        Ok(Ok(coords)) => Some(coords),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Location unavailable");
            None
        }
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis(), "Location lookup timed out");
            None
        }
    }
}

/// Resolve a location, substituting the fixed fallback coordinate on any failure.
pub async fn resolve_location(
    locator: &dyn Locator,
    enabled: bool,
    timeout: Duration,
) -> ResolvedLocation {
    match try_locate(locator, enabled, timeout).await {
        Some(coords) => ResolvedLocation::live(coords),
        None => ResolvedLocation::fallback(),
    }
}

pub const UNKNOWN_DISTRICT: &str = "Unknown Location";

/// Place name for the price screen's "detect location" action.
///
/// Denied or unavailable position is an error; a position the reverse geocoder
/// cannot name becomes [`UNKNOWN_DISTRICT`].
#[tracing::instrument(skip_all)]
pub async fn detect_district(
    locator: &dyn Locator,
    geocoder: &dyn Geocoder,
    enabled: bool,
) -> Result<String> {
    let coords = try_locate(locator, enabled, LOCATE_TIMEOUT)
        .await
        .ok_or_else(|| CoreError::NotFound("Location access denied.".to_string()))?;

    let label = geocoder.reverse(coords).await.map_err(|e| {
        tracing::warn!(error = %e, "Reverse geocoding failed");
        CoreError::NotFound("Could not detect location name.".to_string())
    })?;

    Ok(label.unwrap_or_else(|| UNKNOWN_DISTRICT.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Locator returning a fixed answer after an optional delay.
    pub struct FixedLocator {
        pub answer: Option<Coordinates>,
        pub delay: Duration,
    }

    impl FixedLocator {
        pub fn at(coords: Coordinates) -> Self {
            Self { answer: Some(coords), delay: Duration::ZERO }
        }

        pub fn denied() -> Self {
            Self { answer: None, delay: Duration::ZERO }
        }
    }

    #[async_trait]
    impl Locator for FixedLocator {
        async fn locate(&self) -> Result<Coordinates> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.answer
                .ok_or_else(|| CoreError::NotFound("permission denied".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FixedLocator;
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_denied_uses_fallback() {
        let resolved = resolve_location(&FixedLocator::denied(), true, LOCATE_TIMEOUT).await;
        assert!(resolved.is_fallback());
        assert_eq!(resolved.coords, Coordinates::FALLBACK);
    }

    #[tokio::test]
    async fn test_disabled_never_asks() {
        let locator = FixedLocator::at(Coordinates::new(22.7, 75.8));
        let resolved = resolve_location(&locator, false, LOCATE_TIMEOUT).await;
        assert!(resolved.is_fallback());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_locator_times_out() {
        let locator = FixedLocator {
            answer: Some(Coordinates::new(22.7, 75.8)),
            delay: Duration::from_secs(30),
        };
        let resolved = resolve_location(&locator, true, MAP_LOCATE_TIMEOUT).await;
        assert!(resolved.is_fallback());
    }

    #[tokio::test]
    async fn test_detect_district() {
        use crate::weather::test_support::StubGeocoder;

        let locator = FixedLocator::at(Coordinates::new(22.7, 75.8));
        let named = StubGeocoder { place: None, reverse_label: Some("Indore".to_string()) };
        assert_eq!(detect_district(&locator, &named, true).await.unwrap(), "Indore");

        let unnamed = StubGeocoder { place: None, reverse_label: None };
        assert_eq!(detect_district(&locator, &unnamed, true).await.unwrap(), UNKNOWN_DISTRICT);

        let err = detect_district(&FixedLocator::denied(), &named, true).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ip_locator_reads_position() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "Indore", "latitude": 22.7196, "longitude": 75.8577
            })))
            .mount(&server)
            .await;

        let locator = IpLocator::new(&Config::for_tests(&server.uri()));
        let resolved = resolve_location(&locator, true, LOCATE_TIMEOUT).await;
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.coords, Coordinates::new(22.7196, 75.8577));
    }

    #[tokio::test]
    async fn test_ip_locator_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": true, "reason": "RateLimited"
            })))
            .mount(&server)
            .await;

        let locator = IpLocator::new(&Config::for_tests(&server.uri()));
        assert!(locator.locate().await.is_err());
    }
}
