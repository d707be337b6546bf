//! # Weather Tasks
//!
//! Current conditions (shared by the dashboard widget and the chat weather card)
//! and the seven-day forecast screen.

use std::sync::Arc;

use async_channel::Sender;
use lib_core::location::{resolve_location, try_locate, LOCATE_TIMEOUT};
use parking_lot::RwLock;
use shared::{Coordinates, Locale, WeatherSnapshot};

use super::deliver;
use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::core::Services;
use crate::debug::spawn_tracked;

/// Locate the farmer (when allowed) and fetch current conditions there.
///
/// Without a position the canned snapshot comes back with `is_demo` set.
pub(crate) async fn current_conditions(
    services: &Services,
    location_enabled: bool,
    locale: Locale,
) -> (WeatherSnapshot, Option<Coordinates>) {
    let coords = try_locate(services.locator.as_ref(), location_enabled, LOCATE_TIMEOUT).await;
    let weather = services.weather.snapshot(coords, locale).await.into_inner();
    (weather, coords)
}

/// Load the forecast screen.
pub(crate) fn fetch_forecast(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (services, key, ticket) = {
        let mut state = state.write();
        let key = state.load_key();
        state.weather.loading = true;
        state.weather.loaded_for = Some(key);
        (state.services.clone(), key, state.weather.gate.issue())
    };
    let (locale, location_enabled) = key;

    spawn_tracked("weather_forecast", async move {
        let location =
            resolve_location(services.locator.as_ref(), location_enabled, LOCATE_TIMEOUT).await;
        let live_coords = (!location.is_fallback()).then_some(location.coords);

        let (forecast, current) = tokio::join!(
            services.weather.forecast(location, locale),
            services.weather.snapshot(live_coords, locale)
        );

        tracing::info!(
            days = forecast.days.len(),
            using_fallback = forecast.using_fallback,
            "Forecast loaded"
        );
        deliver(
            &event_tx,
            AppEvent::ForecastLoaded {
                generation: ticket.generation,
                forecast,
                current: current.into_inner(),
            },
        )
        .await;
    });
}
