//! # Navigation Handlers
//!
//! Screen changes with the session guard, and per-screen data loading.
//!
//! Entering a screen starts it fresh, like remounting a page. Screens whose data
//! depends on the language or the location flag remember the settings they loaded
//! for and reload when either changes.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, Screen};
use crate::app::tasks;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle screen change with authentication guard
///
/// Internal handler function - use [`crate::app::App::handle_screen_change`] instead.
pub(crate) fn handle_screen_change(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    screen: Screen,
) {
    let (previous, target) = {
        let mut state = state.write();
        let target = if AppState::requires_auth(screen) && !state.is_authenticated() {
            tracing::info!(
                screen = ?screen,
                "Access denied: screen requires a session, redirecting to Login"
            );
            Screen::Login
        } else {
            screen
        };

        let previous = state.current_screen;
        if previous != target {
            leave_screen(&mut state, previous);
            state.current_screen = target;
            enter_screen(&mut state, target);
        }
        (previous, target)
    };

    if previous == Screen::Map && target != Screen::Map {
        tasks::map::stop(state.clone());
    }
    refresh_current_screen(state, event_tx);
}

/// Stale everything the screen being left still has in flight.
fn leave_screen(state: &mut AppState, screen: Screen) {
    match screen {
        Screen::Dashboard => {
            state.dashboard.weather_gate.invalidate();
            state.dashboard.news_gate.invalidate();
        }
        Screen::Weather => state.weather.gate.invalidate(),
        Screen::Soil => state.soil.reset(),
        Screen::Leaf => state.leaf.reset(),
        Screen::Price => state.price.reset(),
        Screen::Chat => {
            state.chat.weather_gate.invalidate();
            state.chat.reply_gate.invalidate();
        }
        Screen::Home | Screen::Login | Screen::Map | Screen::Settings => {}
    }
}

/// Reset the screen-local state of a screen being entered.
fn enter_screen(state: &mut AppState, screen: Screen) {
    match screen {
        Screen::Dashboard => state.dashboard.loaded_for = None,
        Screen::Weather => state.weather.loaded_for = None,
        Screen::Soil => state.soil.reset(),
        Screen::Leaf => state.leaf.reset(),
        Screen::Price => state.price.reset(),
        Screen::Chat => {
            let locale = state.locale();
            state.chat.reset(locale);
        }
        Screen::Map => state.map.loaded_for = None,
        Screen::Home | Screen::Login | Screen::Settings => {}
    }
}

/// Load the current screen's data if it has not been loaded for the current settings.
///
/// Called after every navigation and once per frame.
pub(crate) fn refresh_current_screen(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (screen, stale) = {
        let Some(state) = state.try_read() else {
            return;
        };
        let key = Some(state.load_key());
        let stale = match state.current_screen {
            Screen::Dashboard => state.dashboard.loaded_for != key,
            Screen::Weather => state.weather.loaded_for != key,
            Screen::Chat => state.chat.loaded_for != key,
            Screen::Map => state.map.loaded_for != key,
            _ => false,
        };
        (state.current_screen, stale)
    };

    if !stale {
        return;
    }

    tracing::debug!(screen = ?screen, "Loading screen data");
    match screen {
        Screen::Dashboard => tasks::dashboard::refresh(state, event_tx),
        Screen::Weather => tasks::weather::fetch_forecast(state, event_tx),
        Screen::Chat => tasks::chat::fetch_weather(state, event_tx),
        Screen::Map => tasks::map::start(state, event_tx),
        _ => {}
    }
}

/// Neighbouring screen in Tab order, skipping protected screens without a session
fn step_screen(state: &AppState, forward: bool) -> Screen {
    let screens = Screen::all();
    let current_idx = screens
        .iter()
        .position(|&s| s == state.current_screen)
        .unwrap_or(0);
    let is_authenticated = state.is_authenticated();

    let mut idx = current_idx;
    for _ in 0..screens.len() {
        idx = if forward {
            (idx + 1) % screens.len()
        } else if idx == 0 {
            screens.len() - 1
        } else {
            idx - 1
        };
        let screen = screens[idx];
        if !AppState::requires_auth(screen) || is_authenticated {
            return screen;
        }
    }
    Screen::Login
}

/// Navigate to next screen in Tab order (skips protected screens if not authenticated)
///
/// Internal handler function - use [`crate::app::App::next_screen`] instead.
pub(crate) fn next_screen(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let target = match state.try_read() {
        Some(guard) => step_screen(&guard, true),
        None => {
            tracing::warn!("Skipped screen navigation - state locked");
            return;
        }
    };
    handle_screen_change(state, event_tx, target);
}

/// Navigate to previous screen in Tab order (skips protected screens if not authenticated)
///
/// Internal handler function - use [`crate::app::App::previous_screen`] instead.
pub(crate) fn previous_screen(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let target = match state.try_read() {
        Some(guard) => step_screen(&guard, false),
        None => {
            tracing::warn!("Skipped screen navigation - state locked");
            return;
        }
    };
    handle_screen_change(state, event_tx, target);
}
