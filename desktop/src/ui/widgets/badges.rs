//! # Badges
//!
//! Small pill labels: demo data, live or default location, the farmer's Kisan ID.

use crate::ui::theme::Theme;
use shared::Locale;

/// Render a filled pill with `text`
pub fn render_pill(
    ui: &mut egui::Ui,
    text: &str,
    fill: egui::Color32,
    text_color: egui::Color32,
) -> egui::Response {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(12.0).strong().color(text_color));
        })
        .response
}

/// "Demo Data" marker for canned results
pub fn render_demo_badge(ui: &mut egui::Ui, locale: Locale) {
    let theme = Theme::default();
    render_pill(
        ui,
        locale.pick("Demo Data", "डेमो डेटा"),
        egui::Color32::from_rgb(254, 243, 199),
        theme.warning,
    )
    .on_hover_text(locale.pick(
        "Sample answer shown because the live service is unavailable",
        "लाइव सेवा उपलब्ध नहीं है, नमूना उत्तर दिखाया गया है",
    ));
}

/// Live / default location marker
pub fn render_location_badge(ui: &mut egui::Ui, using_fallback: bool, label: &str) {
    let theme = Theme::default();
    let (fill, color) = if using_fallback {
        (egui::Color32::from_rgb(243, 244, 246), theme.dim)
    } else {
        (theme.chip, theme.success)
    };
    render_pill(ui, label, fill, color);
}

