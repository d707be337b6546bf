//! # Leaf Health Screen
//!
//! Photo of a crop leaf in, disease diagnosis out.

use crate::app::{AppLike, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::{badges, forms, layouts};
use shared::{DiseaseResult, Locale};

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Render the leaf check screen
pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();
    let leaf = &state.leaf;

    layouts::render_screen_heading(
        ui,
        locale.pick("Leaf Health", "फसल रोग"),
        Some(locale.pick(
            "Take a photo to detect diseases instantly.",
            "रोगों का पता लगाने के लिए फोटो लें।",
        )),
    );

    layouts::render_split_layout(
        ui,
        |ui| {
            layouts::render_card(ui, Some(locale.pick("Leaf Photo", "पत्ती की फोटो")), |ui| {
                match &leaf.image {
                    Some(image) => {
                        ui.add(
                            egui::Image::from_bytes(
                                format!("bytes://leaf/{}", image.file_name),
                                image.bytes.to_vec(),
                            )
                            .max_height(260.0)
                            .maintain_aspect_ratio(true)
                            .corner_radius(egui::CornerRadius::same(8)),
                        );
                        ui.label(egui::RichText::new(&image.file_name).size(12.0).color(theme.dim));
                    }
                    None => {
                        forms::render_hint(
                            ui,
                            locale.pick("No photo selected yet.", "अभी कोई फोटो नहीं चुनी गई।"),
                            &theme,
                        );
                    }
                }
                ui.add_space(8.0);

                if forms::render_button(
                    ui,
                    locale.pick("📷 Choose photo", "📷 फोटो चुनें"),
                    None,
                    Some(egui::vec2(200.0, 36.0)),
                    !leaf.loading,
                )
                .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Leaf photo", PHOTO_EXTENSIONS)
                        .pick_file()
                    {
                        app.handle_leaf_file(&path);
                    }
                }
                if let Some(error) = &leaf.error {
                    ui.add_space(6.0);
                    forms::render_error(ui, error, &theme);
                }

                ui.add_space(12.0);
                if leaf.loading {
                    forms::render_loading(ui, locale.pick("Checking leaf...", "पत्ती की जांच हो रही है..."));
                } else if forms::render_primary_button(
                    ui,
                    locale.pick("Check Disease", "रोग जांचें"),
                    leaf.image.is_some(),
                )
                .clicked()
                {
                    app.handle_check_leaf();
                }
            });
        },
        |ui| {
            if let Some(result) = &leaf.result {
                render_diagnosis(ui, result, locale);
            }
        },
    );
}

fn render_diagnosis(ui: &mut egui::Ui, result: &DiseaseResult, locale: Locale) {
    let theme = Theme::default();

    layouts::render_card(ui, None, |ui| {
        if result.is_demo {
            badges::render_demo_badge(ui, locale);
            ui.add_space(6.0);
        }

        if !result.is_leaf {
            ui.label(
                egui::RichText::new(locale.pick("⚠ This does not look like a leaf", "⚠ यह पत्ती नहीं लगती"))
                    .size(18.0)
                    .strong()
                    .color(theme.warning),
            );
            ui.label(locale.pick(
                "Please upload a clear photo of a single crop leaf.",
                "कृपया फसल की एक पत्ती की साफ फोटो अपलोड करें।",
            ));
            return;
        }

        let (headline, color) = if result.is_healthy {
            (locale.pick("✔ Healthy leaf", "✔ पत्ती स्वस्थ है").to_string(), theme.success)
        } else {
            (format!("⚠ {}", result.disease_name), theme.error)
        };
        ui.label(egui::RichText::new(headline).size(20.0).strong().color(color));

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(locale.pick("Confidence", "विश्वास")).color(theme.dim));
            ui.add(
                egui::ProgressBar::new(f32::from(result.confidence.min(100)) / 100.0)
                    .desired_width(160.0)
                    .text(format!("{}%", result.confidence)),
            );
        });
        ui.add_space(8.0);

        ui.label(egui::RichText::new(locale.pick("Treatment", "उपचार")).strong().color(theme.heading));
        let treatment = match locale {
            Locale::Hi if !result.treatment_hi.is_empty() => &result.treatment_hi,
            _ => &result.treatment_en,
        };
        ui.label(treatment);
    });
}
