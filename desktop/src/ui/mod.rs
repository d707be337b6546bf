//! # GUI Rendering Framework
//!
//! This module orchestrates the per-frame UI pipeline: top bar, sidebar, the
//! current screen, the status bar and toast notifications.

pub mod fonts;
pub mod screens;
pub mod theme;
pub mod widgets;

use std::time::Duration;

use crate::app::{App, AppState, Screen};
use crate::ui::theme::Theme;
use crate::ui::widgets::notifications::NotificationManager;

/// Repaint interval while a load is in flight
const BUSY_REPAINT: Duration = Duration::from_millis(100);

/// Repaint interval when idle, so background results still get picked up
const IDLE_REPAINT: Duration = Duration::from_millis(500);

/// Main render function - called every frame by egui
pub fn render(ctx: &egui::Context, app: &mut App, notifications: &mut NotificationManager) {
    for (level, message) in app.take_notifications() {
        notifications.notify(level, message);
    }

    // Read state for rendering
    let state = {
        match app.state.try_read() {
            Some(state_guard) => state_guard.clone(),
            None => {
                // Lock is held by another task, skip this frame
                ctx.request_repaint_after(BUSY_REPAINT);
                return;
            }
        }
    }; // Lock released here - rendering happens without holding lock

    let is_authenticated = state.is_authenticated();

    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        widgets::nav_bar::render_top_bar(ui, &state, app);
    });

    if is_authenticated {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            render_status_bar(ui, &state);
        });

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(210.0)
            .show(ctx, |ui| {
                widgets::nav_bar::render_sidebar(ui, &state, app);
            });
    }

    // Central panel - Main content area
    egui::CentralPanel::default().show(ctx, |ui| {
        let current_screen = state.current_screen;

        // A protected screen without a session falls back to the login form
        if AppState::requires_auth(current_screen) && !is_authenticated {
            app.handle_screen_change(Screen::Login);
            screens::login::render(ui, &state, app);
            return;
        }

        // Tab cycles screens unless a text field has focus
        let typing = ctx.memory(|m| m.focused().is_some());
        if !typing {
            if ctx.input(|i| i.key_pressed(egui::Key::Tab) && !i.modifiers.shift) {
                app.next_screen();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Tab) && i.modifiers.shift) {
                app.previous_screen();
            }
        }

        match current_screen {
            Screen::Home => screens::home::render(ui, &state, app),
            Screen::Login => screens::login::render(ui, &state, app),
            Screen::Dashboard => screens::dashboard::render(ui, &state, app),
            Screen::Map => screens::map::render(ui, &state, app),
            Screen::Weather => screens::weather::render(ui, &state),
            Screen::Soil => screens::soil::render(ui, &state, app),
            Screen::Leaf => screens::leaf::render(ui, &state, app),
            Screen::Price => screens::price::render(ui, &state, app),
            Screen::Chat => screens::chat::render(ui, &state, app),
            Screen::Settings => screens::settings::render(ui, &state, app),
        }
    });

    notifications.show(ctx);

    let interval = if is_busy(&state) { BUSY_REPAINT } else { IDLE_REPAINT };
    ctx.request_repaint_after(interval);
}

/// Whether any screen is waiting on a background result
fn is_busy(state: &AppState) -> bool {
    state.login.in_progress
        || state.dashboard.weather_loading
        || state.dashboard.news_loading
        || state.soil.loading
        || state.leaf.loading
        || state.price.loading
        || state.price.detecting
        || state.chat.session.is_in_flight()
        || state.weather.loading
        || state
            .map
            .snapshot
            .as_ref()
            .map(|s| s.phase.is_loading())
            .unwrap_or(state.map.handle.is_some())
}

/// Status bar at the bottom: location mode, AI mode and key hints
fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    let theme = Theme::default();
    let locale = state.locale();

    ui.horizontal(|ui| {
        if state.location_enabled() {
            ui.colored_label(theme.success, locale.pick("📍 Live location", "📍 लाइव स्थान"));
        } else {
            ui.colored_label(theme.dim, locale.pick("📍 Default location", "📍 डिफ़ॉल्ट स्थान"));
        }

        ui.separator();

        if state.services.ai_live() {
            ui.colored_label(theme.success, "AI: Live");
        } else {
            ui.colored_label(theme.warning, "AI: Demo");
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(theme.dim, "Tab: Next screen | Shift+Tab: Previous");
        });
    });
}
