//! # Settings Handlers
//!
//! Language and location preference changes. Both write through to the durable
//! store; screens pick the change up on the next frame and reload.

use crate::app::state::{AppState, NotifyLevel};
use parking_lot::RwLock;
use shared::Locale;
use std::sync::Arc;

/// Handle language selection
pub(crate) fn handle_locale_change(state: Arc<RwLock<AppState>>, locale: Locale) {
    let mut app_state = state.write();
    let result = app_state.settings.write().set_locale(locale);

    match result {
        Ok(()) => tracing::info!(locale = locale.code(), "Language changed"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to persist language");
            app_state.notify(NotifyLevel::Warning, e.user_message());
        }
    }
}

/// Handle the location toggle
pub(crate) fn handle_location_toggle(state: Arc<RwLock<AppState>>) {
    let mut app_state = state.write();
    let result = app_state.settings.write().toggle_location();

    match result {
        Ok(enabled) => tracing::info!(enabled, "Location preference changed"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to persist location preference");
            app_state.notify(NotifyLevel::Warning, e.user_message());
        }
    }
}
