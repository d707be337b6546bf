//! # Dashboard Tasks

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;

use super::{deliver, weather::current_conditions};
use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::debug::spawn_tracked;

/// Reload the weather widget and the news feed for the current settings.
pub(crate) fn refresh(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    {
        let mut state = state.write();
        let key = state.load_key();
        state.dashboard.loaded_for = Some(key);
    }
    fetch_weather(state.clone(), event_tx.clone());
    fetch_news(state, event_tx);
}

pub(crate) fn fetch_weather(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (services, (locale, location_enabled), ticket) = {
        let mut state = state.write();
        state.dashboard.weather_loading = true;
        (state.services.clone(), state.load_key(), state.dashboard.weather_gate.issue())
    };

    spawn_tracked("dashboard_weather", async move {
        let (weather, _) = current_conditions(&services, location_enabled, locale).await;
        deliver(
            &event_tx,
            AppEvent::DashboardWeather {
                generation: ticket.generation,
                weather,
            },
        )
        .await;
    });
}

pub(crate) fn fetch_news(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (news, locale, ticket) = {
        let mut state = state.write();
        state.dashboard.news_loading = true;
        state.dashboard.news_error = None;
        (state.services.news.clone(), state.locale(), state.dashboard.news_gate.issue())
    };

    spawn_tracked("dashboard_news", async move {
        let result = news.fetch(locale).await.map_err(|e| {
            tracing::error!(error = %e, "News feed failed");
            e.user_message()
        });
        deliver(
            &event_tx,
            AppEvent::NewsLoaded {
                generation: ticket.generation,
                result,
            },
        )
        .await;
    });
}
