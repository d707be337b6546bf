//! # Form Components
//!
//! Reusable form elements for consistent UI across screens

use crate::ui::theme::Theme;

/// Render a labelled single-line text input
pub fn render_text_input(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    hint: &str,
    password: bool,
    size: [f32; 2],
) -> egui::Response {
    ui.label(egui::RichText::new(label).size(14.0));
    ui.add_sized(
        size,
        egui::TextEdit::singleline(value)
            .password(password)
            .hint_text(hint),
    )
}

/// Render a styled button with optional fill and minimum size
pub fn render_button(
    ui: &mut egui::Ui,
    text: &str,
    fill_color: Option<egui::Color32>,
    min_size: Option<egui::Vec2>,
    enabled: bool,
) -> egui::Response {
    let label = match fill_color {
        Some(_) => egui::RichText::new(text).color(egui::Color32::WHITE).strong(),
        None => egui::RichText::new(text),
    };
    let mut button = egui::Button::new(label);

    if let Some(color) = fill_color {
        button = button.fill(color);
    }
    if let Some(size) = min_size {
        button = button.min_size(size);
    }

    ui.add_enabled(enabled, button)
}

/// Green call-to-action button
pub fn render_primary_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    let theme = Theme::default();
    render_button(ui, text, Some(theme.selected), Some(egui::vec2(160.0, 36.0)), enabled)
}

/// Render an error message
pub fn render_error(ui: &mut egui::Ui, error: &str, theme: &Theme) {
    ui.label(egui::RichText::new(error).color(theme.error));
    ui.add_space(6.0);
}

/// Render a help/hint text
pub fn render_hint(ui: &mut egui::Ui, hint: &str, theme: &Theme) {
    ui.label(egui::RichText::new(hint).size(13.0).color(theme.dim));
}

/// Spinner with a caption
pub fn render_loading(ui: &mut egui::Ui, text: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(text);
    });
}
