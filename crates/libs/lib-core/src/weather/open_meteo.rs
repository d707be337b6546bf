//! Open-Meteo forecast client.

use async_trait::async_trait;
use lib_utils::time::day_label;
use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinates, ForecastDay};

use crate::config::Config;
use crate::error::Result;
use crate::http::{build_client, get_json};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Which blocks to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherQuery {
    pub current: bool,
    pub daily: bool,
    pub days: Option<u8>,
}

impl WeatherQuery {
    pub const CURRENT: WeatherQuery = WeatherQuery {
        current: true,
        daily: false,
        days: None,
    };

    pub const WEEK: WeatherQuery = WeatherQuery {
        current: false,
        daily: true,
        days: Some(7),
    };

    /// Current conditions plus the provider's default daily range.
    pub const FULL: WeatherQuery = WeatherQuery {
        current: true,
        daily: true,
        days: None,
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentBlock>,
    #[serde(default)]
    pub daily: Option<DailyBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub weather_code: u16,
    pub wind_speed_10m: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailyBlock {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<u16>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
}

impl DailyBlock {
    /// One row per date; missing values read as zero.
    pub fn to_days(&self) -> Vec<ForecastDay> {
        let value = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten().unwrap_or(0.0);

        self.time
            .iter()
            .enumerate()
            .map(|(i, date)| ForecastDay {
                date: day_label(date),
                max_temp: value(&self.temperature_2m_max, i),
                min_temp: value(&self.temperature_2m_min, i),
                rain: value(&self.precipitation_sum, i),
                code: self.weather_code.get(i).copied().flatten().unwrap_or(0),
            })
            .collect()
    }
}

#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn fetch(&self, coords: Coordinates, query: WeatherQuery) -> Result<ForecastResponse>;
}

pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: build_client(config.http_timeout()),
            base_url: config.open_meteo_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl WeatherApi for OpenMeteoClient {
    #[tracing::instrument(skip(self), fields(lat = coords.lat, lon = coords.lon))]
    async fn fetch(&self, coords: Coordinates, query: WeatherQuery) -> Result<ForecastResponse> {
        let url = format!("{}/v1/forecast", self.base_url);
        let mut params = vec![
            ("latitude", coords.lat.to_string()),
            ("longitude", coords.lon.to_string()),
        ];
        if query.current {
            params.push(("current", CURRENT_FIELDS.to_string()));
        }
        if query.daily {
            params.push(("daily", DAILY_FIELDS.to_string()));
            params.push(("timezone", "auto".to_string()));
        }
        if let Some(days) = query.days {
            params.push(("forecast_days", days.to_string()));
        }

        get_json(&self.client, &url, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_to_days_tolerates_gaps() {
        let daily = DailyBlock {
            time: vec!["2026-10-19".into(), "2026-10-20".into()],
            weather_code: vec![Some(61)],
            temperature_2m_max: vec![Some(31.5), None],
            temperature_2m_min: vec![Some(19.0), Some(18.2)],
            precipitation_sum: vec![Some(4.2), Some(0.0)],
        };

        let days = daily.to_days();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "Mon 19");
        assert_eq!(days[0].code, 61);
        assert_eq!(days[1].max_temp, 0.0);
        assert_eq!(days[1].code, 0);
    }

    #[tokio::test]
    async fn test_week_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("daily", DAILY_FIELDS))
            .and(query_param("forecast_days", "7"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "daily": {
                    "time": ["2026-10-19"],
                    "weather_code": [3],
                    "temperature_2m_max": [30.1],
                    "temperature_2m_min": [18.4],
                    "precipitation_sum": [0.0]
                }
            })))
            .mount(&server)
            .await;

        let client = OpenMeteoClient::new(&Config::for_tests(&server.uri()));
        let response = client
            .fetch(Coordinates::FALLBACK, WeatherQuery::WEEK)
            .await
            .unwrap();

        assert!(response.current.is_none());
        assert_eq!(response.daily.unwrap().to_days()[0].max_temp, 30.1);
    }
}
