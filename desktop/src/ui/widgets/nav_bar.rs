//! # Navigation
//!
//! Top bar (brand, language toggle, session) and the sidebar of logged-in screens.

use crate::app::{AppLike, AppState, Screen};
use crate::ui::theme::Theme;

/// Render the top bar
pub fn render_top_bar(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();

    ui.horizontal(|ui| {
        ui.set_height(40.0);

        let brand = ui.add(
            egui::Label::new(
                egui::RichText::new("🌾 Maatiputra")
                    .size(22.0)
                    .strong()
                    .color(theme.heading),
            )
            .sense(egui::Sense::click()),
        );
        if brand.clicked() {
            let home = if state.is_authenticated() { Screen::Dashboard } else { Screen::Home };
            app.handle_screen_change(home);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(user) = &state.session {
                if ui.button(locale.pick("Logout", "लॉगआउट")).clicked() {
                    app.handle_logout();
                }
                ui.label(egui::RichText::new(&user.name).strong());
                ui.separator();
            }

            // Shows the language it switches to
            let other = locale.toggled();
            if ui
                .button(other.display_name())
                .on_hover_text(locale.pick("Change language", "भाषा बदलें"))
                .clicked()
            {
                app.handle_locale_change(other);
            }
        });
    });
}

/// Render the sidebar (only visible when a farmer is logged in)
pub fn render_sidebar(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    if !state.is_authenticated() {
        return;
    }
    let locale = state.locale();

    ui.add_space(8.0);
    for &screen in Screen::sidebar() {
        let selected = state.current_screen == screen;
        let label = egui::RichText::new(screen.title(locale)).size(15.0);
        let response = ui.add_sized(
            [ui.available_width(), 32.0],
            egui::Button::selectable(selected, label),
        );
        if response.clicked() && !selected {
            app.handle_screen_change(screen);
        }
    }

    ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.small_button("<").on_hover_text("Shift+Tab").clicked() {
                app.previous_screen();
            }
            if ui.small_button(">").on_hover_text("Tab").clicked() {
                app.next_screen();
            }
        });
    });
}
