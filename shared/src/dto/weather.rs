//! # Weather Records
//!
//! Current conditions for the dashboard widget and the daily series for the forecast screen.

use serde::{Deserialize, Serialize};

/// Current weather at one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Rounded °C
    pub temp: i32,
    pub condition: String,
    /// Relative humidity, percent
    pub humidity: f64,
    /// km/h at 10 m
    pub wind_speed: f64,
    /// Label of the place the reading belongs to
    pub location: String,
    pub is_demo: bool,
}

/// One day of the forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Short label such as `Mon 21`
    pub date: String,
    pub max_temp: f64,
    pub min_temp: f64,
    /// Precipitation sum in mm
    pub rain: f64,
    /// WMO weather interpretation code
    pub code: u16,
}
