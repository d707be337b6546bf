//! # Home Screen
//!
//! Landing page: hero, entry buttons and the three feature cards.

use crate::app::{AppLike, AppState, Screen};
use crate::ui::theme::Theme;
use crate::ui::widgets::{forms, layouts};

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "🍃",
        "AI Leaf Doctor",
        "Snap a photo of your crop. Our Vision AI detects diseases instantly and suggests treatments in Hindi.",
    ),
    (
        "🌱",
        "Soil Health Card",
        "Upload your government Soil Health Card PDF or enter data manually for personalized fertilizer advice.",
    ),
    (
        "📈",
        "Fasaldaam",
        "AI-driven price predictions to help you decide when to sell your produce for maximum profit.",
    ),
];

/// Render the landing page
pub fn render(ui: &mut egui::Ui, _state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Frame::new()
            .fill(theme.colors.forest_green)
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(24, 48))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Smart Farming for a Better Harvest")
                            .size(36.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Maatiputra connects traditional Indian farming with advanced AI. \
                             Soil health, disease detection, and market prices - all in one app.",
                        )
                        .size(17.0)
                        .color(theme.chip),
                    );
                    ui.add_space(24.0);
                    ui.horizontal(|ui| {
                        // Centre the two buttons
                        ui.add_space((ui.available_width() - 340.0).max(0.0) / 2.0);
                        // No registration flow: joining starts at the login form
                        if forms::render_primary_button(ui, "Join as Kisan", true).clicked() {
                            app.handle_screen_change(Screen::Login);
                        }
                        if forms::render_button(ui, "Login", Some(theme.card), Some(egui::vec2(160.0, 36.0)), true)
                            .clicked()
                        {
                            app.handle_screen_change(Screen::Login);
                        }
                    });
                });
            });

        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("FEATURES").strong().color(theme.selected));
            ui.label(egui::RichText::new("Everything a Farmer Needs").size(26.0).strong());
        });
        ui.add_space(12.0);

        ui.columns(FEATURES.len(), |columns| {
            for (column, (icon, title, body)) in columns.iter_mut().zip(FEATURES) {
                layouts::render_card(column, None, |ui| {
                    ui.label(egui::RichText::new(*icon).size(28.0));
                    ui.label(egui::RichText::new(*title).size(18.0).strong());
                    ui.label(egui::RichText::new(*body).color(theme.dim));
                });
            }
        });
    });

    if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        app.handle_screen_change(Screen::Login);
    }
}
