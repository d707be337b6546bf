//! # Event Handler
//!
//! Handles async event results from background tasks, updating application state accordingly.
//!
//! Screen results carry the generation of the request that produced them. A result
//! whose generation is no longer current on the screen's gate is stale (the user
//! navigated away, retried, or changed a setting) and is dropped without touching
//! state.

use crate::app::state::NotifyLevel;
use crate::app::{App, AppEvent, Screen};
use lib_core::ai::ChatReply;
use lib_core::map::MapSnapshot;
use lib_core::weather::Forecast;
use shared::{
    Coordinates, DiseaseResult, NewsArticle, PriceHistoryPoint, PricePrediction, SessionUser,
    SoilReport, WeatherSnapshot,
};

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    /// Handle async event results
    ///
    /// Acquires the write lock per event for minimal duration.
    fn handle_event_impl(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoginCompleted(user) => {
                self.handle_login_completed(user);
            }
            AppEvent::DashboardWeather { generation, weather } => {
                self.handle_dashboard_weather(generation, weather);
            }
            AppEvent::NewsLoaded { generation, result } => {
                self.handle_news_loaded(generation, result);
            }
            AppEvent::SoilAnalyzed { generation, report } => {
                self.handle_soil_analyzed(generation, report);
            }
            AppEvent::LeafChecked { generation, result } => {
                self.handle_leaf_checked(generation, result);
            }
            AppEvent::PricePredicted {
                generation,
                prediction,
                history,
            } => {
                self.handle_price_predicted(generation, prediction, history);
            }
            AppEvent::DistrictDetected { generation, result } => {
                self.handle_district_detected(generation, result);
            }
            AppEvent::ChatWeather {
                generation,
                weather,
                coords,
            } => {
                self.handle_chat_weather(generation, weather, coords);
            }
            AppEvent::ChatReplied { generation, reply } => {
                self.handle_chat_replied(generation, reply);
            }
            AppEvent::ForecastLoaded {
                generation,
                forecast,
                current,
            } => {
                self.handle_forecast_loaded(generation, forecast, current);
            }
            AppEvent::MapUpdated {
                generation,
                snapshot,
            } => {
                self.handle_map_updated(generation, snapshot);
            }
            AppEvent::Notify(level, message) => {
                self.state.write().notify(level, message);
            }
        }
    }
}

fn drop_stale(kind: &'static str, generation: u64) {
    tracing::debug!(event = kind, generation, "Dropping stale result");
}

impl App {
    fn handle_login_completed(&mut self, user: SessionUser) {
        {
            let mut state = self.state.write();
            tracing::info!(kisan_id = %user.kisan_id, is_demo = user.is_demo, "Login completed");
            state.login.in_progress = false;
            state.login.password.clear();
            let message = if user.is_demo {
                "Logged in using demo mode"
            } else {
                "Logged in successfully"
            };
            state.session = Some(user);
            state.notify(NotifyLevel::Success, message);
        }
        self.handle_screen_change(Screen::Dashboard);
    }

    fn handle_dashboard_weather(&mut self, generation: u64, weather: WeatherSnapshot) {
        let mut state = self.state.write();
        if !state.dashboard.weather_gate.is_current(generation) {
            return drop_stale("DashboardWeather", generation);
        }
        state.dashboard.weather_loading = false;
        state.dashboard.weather = Some(weather);
    }

    fn handle_news_loaded(&mut self, generation: u64, result: Result<Vec<NewsArticle>, String>) {
        let mut state = self.state.write();
        if !state.dashboard.news_gate.is_current(generation) {
            return drop_stale("NewsLoaded", generation);
        }
        state.dashboard.news_loading = false;
        match result {
            Ok(news) => {
                state.dashboard.news = news;
                state.dashboard.news_error = None;
            }
            Err(message) => {
                state.dashboard.news.clear();
                state.dashboard.news_error = Some(message);
            }
        }
    }

    fn handle_soil_analyzed(&mut self, generation: u64, report: SoilReport) {
        let mut state = self.state.write();
        if !state.soil.gate.is_current(generation) {
            return drop_stale("SoilAnalyzed", generation);
        }
        tracing::info!(soil_type = %report.soil_type, is_demo = report.is_demo, "Soil report ready");
        state.soil.loading = false;
        state.soil.result = Some(report);
    }

    fn handle_leaf_checked(&mut self, generation: u64, result: DiseaseResult) {
        let mut state = self.state.write();
        if !state.leaf.gate.is_current(generation) {
            return drop_stale("LeafChecked", generation);
        }
        tracing::info!(
            is_leaf = result.is_leaf,
            is_healthy = result.is_healthy,
            confidence = result.confidence,
            "Leaf diagnosis ready"
        );
        state.leaf.loading = false;
        state.leaf.result = Some(result);
    }

    fn handle_price_predicted(
        &mut self,
        generation: u64,
        prediction: PricePrediction,
        history: Vec<PriceHistoryPoint>,
    ) {
        let mut state = self.state.write();
        if !state.price.gate.is_current(generation) {
            return drop_stale("PricePredicted", generation);
        }
        state.price.loading = false;
        state.price.prediction = Some(prediction);
        state.price.history = history;
    }

    fn handle_district_detected(&mut self, generation: u64, result: Result<String, String>) {
        let mut state = self.state.write();
        if !state.price.detect_gate.is_current(generation) {
            return drop_stale("DistrictDetected", generation);
        }
        state.price.detecting = false;
        match result {
            Ok(district) => state.price.district = district,
            Err(message) => state.notify(NotifyLevel::Error, message),
        }
    }

    fn handle_chat_weather(
        &mut self,
        generation: u64,
        weather: WeatherSnapshot,
        coords: Option<Coordinates>,
    ) {
        let mut state = self.state.write();
        if !state.chat.weather_gate.is_current(generation) {
            return drop_stale("ChatWeather", generation);
        }
        state.chat.weather = Some(weather);
        state.chat.coords = coords;
    }

    fn handle_chat_replied(&mut self, generation: u64, reply: ChatReply) {
        let mut state = self.state.write();
        if !state.chat.reply_gate.is_current(generation) {
            return drop_stale("ChatReplied", generation);
        }
        state.chat.session.finish(reply);
    }

    fn handle_forecast_loaded(
        &mut self,
        generation: u64,
        forecast: Forecast,
        current: WeatherSnapshot,
    ) {
        let mut state = self.state.write();
        if !state.weather.gate.is_current(generation) {
            return drop_stale("ForecastLoaded", generation);
        }
        state.weather.loading = false;
        state.weather.forecast = Some(forecast);
        state.weather.current = Some(current);
    }

    fn handle_map_updated(&mut self, generation: u64, snapshot: MapSnapshot) {
        let mut state = self.state.write();
        if !state.map.gate.is_current(generation) {
            return drop_stale("MapUpdated", generation);
        }
        state.map.snapshot = Some(snapshot);
    }
}
