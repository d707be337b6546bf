//! # Weather
//!
//! Current conditions, the 7-day forecast and the structured report handed to the
//! chat assistant's weather tool.
//!
//! | Operation                          | Failure behaviour                         |
//! |------------------------------------|-------------------------------------------|
//! | [`WeatherService::snapshot`]       | demo snapshot (no coords, error, 5 s)     |
//! | [`WeatherService::forecast`]       | empty day list, label still resolved      |
//! | [`WeatherService::tool_report`]    | `{"error": ...}` payload                  |

pub mod open_meteo;
pub mod wmo;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use shared::{Coordinates, ForecastDay, Locale, ResolvedLocation, WeatherSnapshot};

use crate::canned;
use crate::error::{CoreError, Result};
use crate::geo::Geocoder;
use crate::resilient::{Outcome, ResilientCall};

pub use open_meteo::{ForecastResponse, OpenMeteoClient, WeatherApi, WeatherQuery};

pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

/// Forecast screen payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub location_label: String,
    pub days: Vec<ForecastDay>,
    pub using_fallback: bool,
}

pub struct WeatherService {
    api: Arc<dyn WeatherApi>,
    geocoder: Arc<dyn Geocoder>,
}

impl WeatherService {
    pub fn new(api: Arc<dyn WeatherApi>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { api, geocoder }
    }

    /// Current conditions at `coords`, or the demo snapshot without coordinates.
    pub async fn snapshot(&self, coords: Option<Coordinates>, locale: Locale) -> Outcome<WeatherSnapshot> {
        let live = coords.map(|coords| self.current(coords, locale));
        ResilientCall::new("weather")
            .timeout(WEATHER_TIMEOUT)
            .run(live, || canned::weather(locale))
            .await
    }

    async fn current(&self, coords: Coordinates, locale: Locale) -> Result<WeatherSnapshot> {
        let response = self.api.fetch(coords, WeatherQuery::CURRENT).await?;
        let current = response
            .current
            .ok_or_else(|| CoreError::Decode("forecast response has no current block".to_string()))?;

        Ok(WeatherSnapshot {
            temp: current.temperature_2m.round() as i32,
            condition: wmo::describe(current.weather_code).to_string(),
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            location: canned::current_location_label(locale).to_string(),
            is_demo: false,
        })
    }

    /// Seven-day forecast for an already resolved location.
    pub async fn forecast(&self, location: ResolvedLocation, locale: Locale) -> Forecast {
        let (label, days) = tokio::join!(
            self.location_label(location, locale),
            self.api.fetch(location.coords, WeatherQuery::WEEK)
        );

        let days = match days {
            Ok(response) => response.daily.map(|daily| daily.to_days()).unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Forecast fetch failed");
                Vec::new()
            }
        };

        Forecast {
            location_label: label,
            days,
            using_fallback: location.is_fallback(),
        }
    }

    async fn location_label(&self, location: ResolvedLocation, locale: Locale) -> String {
        if location.is_fallback() {
            return canned::demo_location_label(locale).to_string();
        }
        match self.geocoder.reverse(location.coords).await {
            Ok(Some(label)) => label,
            Ok(None) => canned::current_location_label(locale).to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "Reverse geocoding failed");
                canned::current_location_label(locale).to_string()
            }
        }
    }

    /// Structured weather report for a free-text place, as returned to the assistant.
    pub async fn tool_report(&self, query: &str) -> Value {
        let place = match self.geocoder.search(query).await {
            Ok(Some(place)) => place,
            Ok(None) => return json!({ "error": "Location not found" }),
            Err(e) => {
                tracing::warn!(error = %e, query, "Weather tool geocoding failed");
                return json!({ "error": "Service Unavailable" });
            }
        };

        let response = match self.api.fetch(place.coords, WeatherQuery::FULL).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, query, "Weather tool forecast failed");
                return json!({ "error": "Service Unavailable" });
            }
        };

        let (Some(current), Some(daily)) = (response.current, response.daily) else {
            return json!({ "error": "Service Unavailable" });
        };

        let conditions: Vec<&str> = daily.weather_code.iter().map(|c| wmo::describe_opt(*c)).collect();

        json!({
            "location": place.label(),
            "current": {
                "temp_c": current.temperature_2m,
                "humidity": current.relative_humidity_2m,
                "wind_speed_kmh": current.wind_speed_10m,
                "condition": wmo::describe(current.weather_code),
            },
            "daily_forecast": {
                "dates": daily.time,
                "max_temp_c": daily.temperature_2m_max,
                "min_temp_c": daily.temperature_2m_min,
                "rain_mm": daily.precipitation_sum,
                "conditions": conditions,
            }
        })
    }
}

/// One line of farm advice for the current conditions.
pub fn farm_outlook(snapshot: &WeatherSnapshot, locale: Locale) -> &'static str {
    let condition = snapshot.condition.to_lowercase();
    if ["rain", "drizzle", "showers", "thunderstorm", "बारिश"]
        .iter()
        .any(|word| condition.contains(word))
    {
        return locale.pick(
            "Avoid spraying today, rain expected.",
            "आज छिड़काव न करें, बारिश की संभावना है।",
        );
    }
    if snapshot.temp > 35 {
        return locale.pick(
            "High heat: Ensure proper irrigation.",
            "तेज गर्मी: सिंचाई का ध्यान रखें।",
        );
    }
    locale.pick(
        "Great day for regular farm activities.",
        "खेती के कामों के लिए आज का दिन अच्छा है।",
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::geo::Place;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    pub struct StubWeather {
        pub response: Option<ForecastResponse>,
        pub calls: Mutex<Vec<(Coordinates, WeatherQuery)>>,
    }

    impl StubWeather {
        pub fn returning(json: Value) -> Self {
            Self {
                response: serde_json::from_value(json).ok(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self { response: None, calls: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl WeatherApi for StubWeather {
        async fn fetch(&self, coords: Coordinates, query: WeatherQuery) -> Result<ForecastResponse> {
            self.calls.lock().push((coords, query));
            self.response
                .clone()
                .ok_or_else(|| CoreError::Network("connection refused".to_string()))
        }
    }

    pub struct StubGeocoder {
        pub place: Option<Place>,
        pub reverse_label: Option<String>,
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn search(&self, _name: &str) -> Result<Option<Place>> {
            Ok(self.place.clone())
        }

        async fn reverse(&self, _coords: Coordinates) -> Result<Option<String>> {
            Ok(self.reverse_label.clone())
        }
    }

    pub fn indore() -> Place {
        Place {
            name: "Indore".to_string(),
            admin1: Some("Madhya Pradesh".to_string()),
            coords: Coordinates::new(22.72, 75.86),
        }
    }

    pub fn full_response() -> Value {
        json!({
            "current": {
                "temperature_2m": 31.6,
                "relative_humidity_2m": 48.0,
                "weather_code": 61,
                "wind_speed_10m": 12.4
            },
            "daily": {
                "time": ["2026-10-19", "2026-10-20"],
                "weather_code": [61, 999],
                "temperature_2m_max": [32.0, 30.5],
                "temperature_2m_min": [21.0, 20.1],
                "precipitation_sum": [5.5, 0.0]
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn service(api: StubWeather, geocoder: StubGeocoder) -> (WeatherService, Arc<StubWeather>) {
        let api = Arc::new(api);
        (WeatherService::new(api.clone(), Arc::new(geocoder)), api)
    }

    fn no_geo() -> StubGeocoder {
        StubGeocoder { place: None, reverse_label: None }
    }

    // ========== Snapshot Tests ==========

    #[tokio::test]
    async fn test_snapshot_without_coords_is_demo() {
        let (service, api) = service(StubWeather::failing(), no_geo());
        let outcome = service.snapshot(None, Locale::Hi).await;

        assert!(outcome.is_canned());
        let snapshot = outcome.into_inner();
        assert_eq!(snapshot.location, "भोपाल (डेमो)");
        assert!(api.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_live_rounds_temperature() {
        let (service, _) = service(StubWeather::returning(full_response()), no_geo());
        let snapshot = service
            .snapshot(Some(Coordinates::new(22.7, 75.8)), Locale::En)
            .await
            .into_inner();

        assert_eq!(snapshot.temp, 32);
        assert_eq!(snapshot.condition, "Slight rain");
        assert_eq!(snapshot.location, "Current Location");
        assert!(!snapshot.is_demo);
    }

    #[tokio::test]
    async fn test_snapshot_failure_is_demo() {
        let (service, _) = service(StubWeather::failing(), no_geo());
        let outcome = service.snapshot(Some(Coordinates::FALLBACK), Locale::En).await;
        assert_eq!(outcome.into_inner().location, "Bhopal (Demo)");
    }

    // ========== Forecast Tests ==========

    #[tokio::test]
    async fn test_forecast_fallback_label() {
        let (service, api) = service(StubWeather::returning(full_response()), no_geo());
        let forecast = service.forecast(ResolvedLocation::fallback(), Locale::En).await;

        assert_eq!(forecast.location_label, "Bhopal (Demo)");
        assert!(forecast.using_fallback);
        assert_eq!(forecast.days.len(), 2);
        assert_eq!(api.calls.lock()[0], (Coordinates::FALLBACK, WeatherQuery::WEEK));
    }

    #[tokio::test]
    async fn test_forecast_live_uses_reverse_label() {
        let geocoder = StubGeocoder {
            place: None,
            reverse_label: Some("Sehore".to_string()),
        };
        let (service, _) = service(StubWeather::failing(), geocoder);
        let forecast = service
            .forecast(ResolvedLocation::live(Coordinates::new(23.2, 77.08)), Locale::En)
            .await;

        assert_eq!(forecast.location_label, "Sehore");
        assert!(forecast.days.is_empty());
    }

    // ========== Tool Report Tests ==========

    #[tokio::test]
    async fn test_tool_report_shape() {
        let geocoder = StubGeocoder { place: Some(indore()), reverse_label: None };
        let (service, _) = service(StubWeather::returning(full_response()), geocoder);
        let report = service.tool_report("Indore").await;

        assert_eq!(report["location"], "Indore, Madhya Pradesh");
        assert_eq!(report["current"]["condition"], "Slight rain");
        assert_eq!(report["current"]["temp_c"], 31.6);
        assert_eq!(report["daily_forecast"]["conditions"], json!(["Slight rain", "Unknown"]));
    }

    #[tokio::test]
    async fn test_tool_report_not_found() {
        let (service, _) = service(StubWeather::returning(full_response()), no_geo());
        assert_eq!(service.tool_report("Atlantis").await, json!({ "error": "Location not found" }));
    }

    #[tokio::test]
    async fn test_tool_report_service_unavailable() {
        let geocoder = StubGeocoder { place: Some(indore()), reverse_label: None };
        let (service, _) = service(StubWeather::failing(), geocoder);
        assert_eq!(service.tool_report("Indore").await, json!({ "error": "Service Unavailable" }));
    }

    // ========== Outlook Tests ==========

    #[test]
    fn test_farm_outlook() {
        let mut snapshot = canned::weather(Locale::En);
        assert_eq!(farm_outlook(&snapshot, Locale::En), "Great day for regular farm activities.");

        snapshot.temp = 38;
        assert_eq!(farm_outlook(&snapshot, Locale::Hi), "तेज गर्मी: सिंचाई का ध्यान रखें।");

        snapshot.condition = "Heavy rain".to_string();
        assert_eq!(farm_outlook(&snapshot, Locale::En), "Avoid spraying today, rain expected.");
    }
}
