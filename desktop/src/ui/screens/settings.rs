//! # Settings Screen
//!
//! Language, location access and the farmer profile. Both preferences are saved
//! immediately and reload the screens that depend on them.

use crate::app::{AppLike, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::{badges, forms, layouts};
use shared::Locale;

/// Render settings screen
pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();
    let location_enabled = state.location_enabled();

    layouts::render_screen_heading(ui, locale.pick("Settings", "सेटिंग्स"), None);

    layouts::render_card(ui, Some(locale.pick("Language", "भाषा")), |ui| {
        ui.horizontal(|ui| {
            for option in Locale::all() {
                if ui
                    .add(egui::Button::selectable(locale == *option, option.display_name()))
                    .clicked()
                    && locale != *option
                {
                    app.handle_locale_change(*option);
                }
            }
        });
    });
    ui.add_space(10.0);

    layouts::render_card(ui, Some(locale.pick("Location", "स्थान")), |ui| {
        let mut enabled = location_enabled;
        if ui
            .checkbox(
                &mut enabled,
                locale.pick("Use my location for weather and map", "मौसम और नक्शे के लिए मेरा स्थान उपयोग करें"),
            )
            .changed()
        {
            app.handle_location_toggle();
        }
        forms::render_hint(
            ui,
            locale.pick(
                "When off, the default farm location (Bhopal) is used.",
                "बंद होने पर डिफ़ॉल्ट खेत स्थान (भोपाल) का उपयोग होता है।",
            ),
            &theme,
        );
    });
    ui.add_space(10.0);

    if let Some(user) = &state.session {
        layouts::render_card(ui, Some(locale.pick("Kisan Profile", "किसान प्रोफ़ाइल")), |ui| {
            egui::Grid::new("kisan_profile")
                .num_columns(2)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(locale.pick("Name", "नाम")).color(theme.dim));
                    ui.label(&user.name);
                    ui.end_row();
                    ui.label(egui::RichText::new("Kisan ID").color(theme.dim));
                    ui.label(&user.kisan_id);
                    ui.end_row();
                    ui.label(egui::RichText::new(locale.pick("Phone", "फ़ोन")).color(theme.dim));
                    ui.label(&user.phone);
                    ui.end_row();
                    ui.label(egui::RichText::new(locale.pick("Location", "स्थान")).color(theme.dim));
                    ui.label(&user.location);
                    ui.end_row();
                });
            if user.is_demo {
                ui.add_space(6.0);
                badges::render_demo_badge(ui, locale);
            }
        });
        ui.add_space(10.0);
    }

    layouts::render_card(ui, Some(locale.pick("AI Services", "AI सेवाएं")), |ui| {
        if state.services.ai_live() {
            ui.label(egui::RichText::new(locale.pick("● Live AI connected", "● लाइव AI जुड़ा है")).color(theme.success));
        } else {
            ui.label(
                egui::RichText::new(locale.pick(
                    "● No API key configured, sample answers are shown",
                    "● API कुंजी नहीं है, नमूना उत्तर दिखाए जा रहे हैं",
                ))
                .color(theme.warning),
            );
        }
    });
}
