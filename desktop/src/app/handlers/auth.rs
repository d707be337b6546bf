//! # Authentication Handlers
//!
//! Simulated login and logout. There is no credential check: every login becomes a
//! demo session.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, LoginForm, NotifyLevel, Screen};
use crate::app::tasks;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle login button click (also used by the demo mode button)
///
/// Internal handler function - use [`crate::app::App::handle_login_click`] instead.
pub(crate) fn handle_login_click(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let email = {
        let mut state = state.write();
        if state.login.in_progress {
            return;
        }
        state.login.in_progress = true;
        state.login.email.trim().to_string()
    };

    tracing::info!("Login requested");
    tasks::auth::login(event_tx, email);
}

/// Handle logout
///
/// Internal handler function - use [`crate::app::App::handle_logout`] instead.
pub(crate) fn handle_logout(state: Arc<RwLock<AppState>>) {
    tasks::map::stop(state.clone());

    let mut state = state.write();
    let locale = state.locale();
    state.session = None;
    state.login = LoginForm::default();
    state.soil.reset();
    state.leaf.reset();
    state.price.reset();
    state.chat.reset(locale);
    state.dashboard.loaded_for = None;
    state.weather.loaded_for = None;
    state.current_screen = Screen::Home;
    state.notify(NotifyLevel::Success, "Logged out successfully");

    tracing::info!("Logged out");
}
