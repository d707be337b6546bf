//! # Login Screen
//!
//! Simulated login. Any email and password are accepted and start a demo session;
//! "Demo User Mode" does the same with whatever is typed.

use crate::app::{AppLike, AppState, Screen};
use crate::ui::theme::Theme;
use crate::ui::widgets::{forms, layouts};

/// Render the login form
pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();
    let in_progress = state.login.in_progress;

    // Create local mutable copies for text inputs
    let mut email = state.login.email.clone();
    let mut password = state.login.password.clone();
    let mut submit = false;

    layouts::render_centered(ui, |ui| {
        ui.set_max_width(360.0);
        layouts::render_card(ui, Some(locale.pick("Farmer Login", "किसान लॉगिन")), |ui| {
            let email_response = forms::render_text_input(
                ui,
                locale.pick("Email", "ईमेल"),
                &mut email,
                "ramesh@example.com",
                false,
                [300.0, 30.0],
            );
            ui.add_space(8.0);
            let password_response = forms::render_text_input(
                ui,
                locale.pick("Password", "पासवर्ड"),
                &mut password,
                "••••••••",
                true,
                [300.0, 30.0],
            );

            if password_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }

            if email_response.changed() || password_response.changed() {
                let mut state = app.state().write();
                state.login.email = email.clone();
                state.login.password = password.clone();
            }

            ui.add_space(14.0);
            if in_progress {
                forms::render_loading(ui, locale.pick("Logging in...", "लॉगिन हो रहा है..."));
            } else {
                ui.horizontal(|ui| {
                    if forms::render_primary_button(ui, locale.pick("Login", "लॉगिन"), true).clicked() {
                        submit = true;
                    }
                    if forms::render_button(
                        ui,
                        locale.pick("Demo User Mode", "डेमो मोड"),
                        None,
                        Some(egui::vec2(120.0, 36.0)),
                        true,
                    )
                    .clicked()
                    {
                        submit = true;
                    }
                });
            }

            ui.add_space(10.0);
            forms::render_hint(
                ui,
                locale.pick(
                    "No account needed: every login opens a demo session.",
                    "खाते की ज़रूरत नहीं: हर लॉगिन डेमो सत्र खोलता है।",
                ),
                &theme,
            );
            ui.add_space(6.0);
            if ui.link(locale.pick("Back to Home", "होम पर वापस")).clicked() {
                app.handle_screen_change(Screen::Home);
            }
        });
    });

    if submit && !in_progress {
        app.handle_login_click();
    }
}
