//! # Layout Components
//!
//! Reusable layout patterns for consistent screen organization

use crate::ui::theme::Theme;

/// Render a two-column split layout
pub fn render_split_layout<F1, F2>(ui: &mut egui::Ui, left_content: F1, right_content: F2)
where
    F1: FnOnce(&mut egui::Ui),
    F2: FnOnce(&mut egui::Ui),
{
    ui.columns(2, |columns| {
        left_content(&mut columns[0]);
        right_content(&mut columns[1]);
    });
}

/// Render vertically centered content
pub fn render_centered<F>(ui: &mut egui::Ui, content: F)
where
    F: FnOnce(&mut egui::Ui),
{
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        content(ui);
    });
}

/// Render a white rounded card with optional heading
pub fn render_card<F>(ui: &mut egui::Ui, heading: Option<&str>, content: F)
where
    F: FnOnce(&mut egui::Ui),
{
    let theme = Theme::default();
    egui::Frame::new()
        .fill(theme.card)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            if let Some(heading_text) = heading {
                ui.label(
                    egui::RichText::new(heading_text)
                        .size(17.0)
                        .strong()
                        .color(theme.heading),
                );
                ui.add_space(8.0);
            }
            content(ui);
        });
}

/// Screen heading with an optional subtitle
pub fn render_screen_heading(ui: &mut egui::Ui, title: &str, subtitle: Option<&str>) {
    let theme = Theme::default();
    ui.label(egui::RichText::new(title).size(26.0).strong().color(theme.heading));
    if let Some(subtitle) = subtitle {
        ui.label(egui::RichText::new(subtitle).color(theme.dim));
    }
    ui.add_space(12.0);
}
