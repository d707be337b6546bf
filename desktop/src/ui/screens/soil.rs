//! # Soil Analysis Screen
//!
//! Upload a Soil Health Card (PDF, photo or text export) and get the soil type,
//! three suitable crops and fertilizer advice.

use crate::app::{AppLike, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::{badges, forms, layouts};
use shared::{Locale, SoilReport};

const CARD_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "webp", "txt", "csv", "json"];

/// Render the soil analysis screen
pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();
    let soil = &state.soil;

    layouts::render_screen_heading(
        ui,
        locale.pick("Soil Analysis", "मृदा परीक्षण"),
        Some(locale.pick(
            "Upload your Soil Health Card for crop and fertilizer advice.",
            "फसल और खाद की सलाह के लिए अपना मृदा स्वास्थ्य कार्ड अपलोड करें।",
        )),
    );

    layouts::render_split_layout(
        ui,
        |ui| {
            layouts::render_card(ui, Some(locale.pick("Soil Health Card", "मृदा स्वास्थ्य कार्ड")), |ui| {
                let pick_label = match &soil.file_name {
                    Some(_) => locale.pick("📄 Choose another file", "📄 दूसरी फ़ाइल चुनें"),
                    None => locale.pick("📄 Upload card (PDF / image)", "📄 कार्ड अपलोड करें (PDF / फोटो)"),
                };
                if forms::render_button(ui, pick_label, None, Some(egui::vec2(240.0, 40.0)), !soil.loading)
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Soil Health Card", CARD_EXTENSIONS)
                        .pick_file()
                    {
                        app.handle_soil_file(&path);
                    }
                }

                if let Some(name) = &soil.file_name {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(format!("✔ {}", name)).color(theme.success));
                }
                if let Some(error) = &soil.error {
                    ui.add_space(6.0);
                    forms::render_error(ui, error, &theme);
                }

                ui.add_space(12.0);
                if soil.loading {
                    forms::render_loading(ui, locale.pick("Analyzing soil...", "मिट्टी का विश्लेषण हो रहा है..."));
                } else if forms::render_primary_button(
                    ui,
                    locale.pick("Analyze Soil", "विश्लेषण करें"),
                    soil.input.is_some(),
                )
                .clicked()
                {
                    app.handle_analyze_soil();
                }
            });
        },
        |ui| match &soil.result {
            Some(report) => render_report(ui, report, locale),
            None => {
                layouts::render_card(ui, None, |ui| {
                    forms::render_hint(
                        ui,
                        locale.pick(
                            "Results will appear here after analysis.",
                            "विश्लेषण के बाद परिणाम यहाँ दिखेंगे।",
                        ),
                        &theme,
                    );
                });
            }
        },
    );
}

fn render_report(ui: &mut egui::Ui, report: &SoilReport, locale: Locale) {
    let theme = Theme::default();

    layouts::render_card(ui, None, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(locale.pick("Soil Report", "मृदा रिपोर्ट"))
                    .size(17.0)
                    .strong()
                    .color(theme.heading),
            );
            if report.is_demo {
                badges::render_demo_badge(ui, locale);
            }
        });
        ui.add_space(8.0);

        ui.label(egui::RichText::new(locale.pick("Soil Type", "मिट्टी का प्रकार")).color(theme.dim));
        ui.label(egui::RichText::new(&report.soil_type).size(20.0).strong());
        ui.add_space(8.0);

        ui.label(egui::RichText::new(locale.pick("Recommended Crops", "अनुशंसित फसलें")).color(theme.dim));
        ui.horizontal_wrapped(|ui| {
            for crop in &report.crop_recommendations {
                badges::render_pill(ui, crop, theme.chip, theme.heading);
            }
        });
        ui.add_space(8.0);

        ui.label(egui::RichText::new(locale.pick("Fertilizer Advice", "उर्वरक सलाह")).color(theme.dim));
        ui.label(&report.fertilizer_advice);

        if !report.analysis.is_empty() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(locale.pick("Analysis", "विश्लेषण")).color(theme.dim));
            ui.label(&report.analysis);
        }
    });
}
