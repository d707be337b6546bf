//! # Application Events
//!
//! Event types for async task communication between background tasks and the main thread.
//!
//! Results tied to a screen request carry the `generation` of the ticket they were
//! issued under; the event handler drops them when the screen's gate has moved on.

use lib_core::ai::ChatReply;
use lib_core::map::MapSnapshot;
use lib_core::weather::Forecast;
use shared::{
    Coordinates, DiseaseResult, NewsArticle, PriceHistoryPoint, PricePrediction, SessionUser,
    SoilReport, WeatherSnapshot,
};

use crate::app::state::NotifyLevel;

/// Async task results sent to main thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Simulated login finished
    LoginCompleted(SessionUser),
    /// Dashboard weather widget data
    DashboardWeather {
        generation: u64,
        weather: WeatherSnapshot,
    },
    /// Dashboard news feed
    NewsLoaded {
        generation: u64,
        result: Result<Vec<NewsArticle>, String>,
    },
    /// Soil health card analysed
    SoilAnalyzed { generation: u64, report: SoilReport },
    /// Leaf photo checked
    LeafChecked {
        generation: u64,
        result: DiseaseResult,
    },
    /// Crop price predicted, with the mock history around it
    PricePredicted {
        generation: u64,
        prediction: PricePrediction,
        history: Vec<PriceHistoryPoint>,
    },
    /// District name for the price screen
    DistrictDetected {
        generation: u64,
        result: Result<String, String>,
    },
    /// Chat weather card and the coordinates used for grounding
    ChatWeather {
        generation: u64,
        weather: WeatherSnapshot,
        coords: Option<Coordinates>,
    },
    /// Assistant reply
    ChatReplied { generation: u64, reply: ChatReply },
    /// Seven-day forecast and current conditions
    ForecastLoaded {
        generation: u64,
        forecast: Forecast,
        current: WeatherSnapshot,
    },
    /// Map driver published a new state
    MapUpdated {
        generation: u64,
        snapshot: MapSnapshot,
    },
    /// Toast from a background task
    Notify(NotifyLevel, String),
}
