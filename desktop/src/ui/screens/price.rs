//! # Fasaldaam Screen
//!
//! Next month's mandi price for a crop and district, with a sell/hold call and
//! six months of history.

use crate::app::{AppLike, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::{badges, forms, layouts};
use egui_plot::{Line, Plot, PlotPoints};
use lib_core::ai::advisory::CROPS;
use shared::{format_rupees, Locale, PriceHistoryPoint, PricePrediction, Recommendation};

/// Render the price prediction screen
pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let locale = state.locale();

    layouts::render_screen_heading(
        ui,
        locale.pick("Fasaldaam", "फसल दाम"),
        Some(locale.pick(
            "AI price prediction for your crop at the nearest mandi.",
            "नज़दीकी मंडी में आपकी फसल के दाम का अनुमान।",
        )),
    );

    layouts::render_split_layout(
        ui,
        |ui| render_form(ui, state, app),
        |ui| {
            if let Some(prediction) = &state.price.prediction {
                render_prediction(ui, prediction, locale);
                ui.add_space(10.0);
                render_history(ui, &state.price.history, locale);
            }
        },
    );
}

fn render_form(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();
    let price = &state.price;

    let mut crop = price.crop.clone();
    let mut district = price.district.clone();

    layouts::render_card(ui, Some(locale.pick("Crop Details", "फसल विवरण")), |ui| {
        ui.label(locale.pick("Crop", "फसल"));
        let selected = CROPS
            .iter()
            .find(|(value, _)| *value == crop)
            .map(|(_, label)| *label)
            .unwrap_or_else(|| locale.pick("Select Crop", "फसल चुनें"));
        egui::ComboBox::from_id_salt("price_crop")
            .selected_text(selected)
            .width(260.0)
            .show_ui(ui, |ui| {
                for (value, label) in CROPS {
                    ui.selectable_value(&mut crop, value.to_string(), *label);
                }
            });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                forms::render_text_input(
                    ui,
                    locale.pick("District", "जिला"),
                    &mut district,
                    locale.pick("e.g. Indore", "जैसे इंदौर"),
                    false,
                    [200.0, 30.0],
                );
            });
            ui.vertical(|ui| {
                ui.add_space(20.0);
                if price.detecting {
                    ui.spinner();
                } else if ui
                    .button("📍")
                    .on_hover_text(locale.pick("Detect my district", "मेरा जिला पता करें"))
                    .clicked()
                {
                    app.handle_detect_district();
                }
            });
        });

        ui.add_space(12.0);
        let ready = !crop.is_empty() && !district.trim().is_empty();
        if price.loading {
            forms::render_loading(ui, locale.pick("Predicting price...", "दाम का अनुमान लगाया जा रहा है..."));
        } else {
            if forms::render_primary_button(ui, locale.pick("Predict Price", "दाम जानें"), ready).clicked() {
                // Persist the edits before the handler reads them
                {
                    let mut state = app.state().write();
                    state.price.crop = crop.clone();
                    state.price.district = district.clone();
                }
                app.handle_predict_price();
            }
            if !ready {
                forms::render_hint(
                    ui,
                    locale.pick("Select a crop and enter a district.", "फसल चुनें और जिला लिखें।"),
                    &theme,
                );
            }
        }
    });

    if crop != price.crop || district != price.district {
        let mut state = app.state().write();
        state.price.crop = crop;
        state.price.district = district;
    }
}

fn render_prediction(ui: &mut egui::Ui, prediction: &PricePrediction, locale: Locale) {
    let theme = Theme::default();

    layouts::render_card(ui, None, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(&prediction.crop)
                    .size(20.0)
                    .strong()
                    .color(theme.heading),
            );
            if prediction.is_demo {
                badges::render_demo_badge(ui, locale);
            }
        });
        ui.label(
            egui::RichText::new(format!("📍 {}", prediction.nearest_mandi)).color(theme.dim),
        );
        ui.add_space(8.0);

        egui::Grid::new("price_prediction")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                ui.label(egui::RichText::new(locale.pick("Current Price", "वर्तमान दाम")).color(theme.dim));
                ui.label(egui::RichText::new(format!("{} /Q", format_rupees(prediction.current_price))).strong());
                ui.end_row();

                ui.label(egui::RichText::new(locale.pick("Next Month", "अगले महीने")).color(theme.dim));
                ui.label(
                    egui::RichText::new(format!("{} /Q", format_rupees(prediction.predicted_price)))
                        .size(18.0)
                        .strong(),
                );
                ui.end_row();

                let (change, change_color) = theme.format_change(prediction.change_percent());
                ui.label(egui::RichText::new(locale.pick("Trend", "रुझान")).color(theme.dim));
                ui.label(
                    egui::RichText::new(format!("{} ({})", prediction.trend.label(), change))
                        .color(change_color),
                );
                ui.end_row();
            });

        ui.add_space(10.0);
        let (call, fill) = match prediction.recommendation {
            Recommendation::Sell => (locale.pick("SELL NOW", "अभी बेचें"), theme.success),
            Recommendation::Hold => (locale.pick("HOLD", "रुकें"), theme.warning),
        };
        badges::render_pill(ui, call, fill, egui::Color32::WHITE);
    });
}

fn render_history(ui: &mut egui::Ui, history: &[PriceHistoryPoint], locale: Locale) {
    if history.is_empty() {
        return;
    }
    let theme = Theme::default();
    let months: Vec<String> = history.iter().map(|point| point.month.clone()).collect();
    let points: Vec<[f64; 2]> = history
        .iter()
        .enumerate()
        .map(|(i, point)| [i as f64, point.price])
        .collect();

    layouts::render_card(ui, Some(locale.pick("Price History", "पिछले दाम")), |ui| {
        Plot::new("price_history")
            .view_aspect(2.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let index = mark.value.round();
                if (mark.value - index).abs() > f64::EPSILON || index < 0.0 {
                    return String::new();
                }
                months.get(index as usize).cloned().unwrap_or_default()
            })
            .y_axis_formatter(|mark, _range| format_rupees(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("price", PlotPoints::from(points))
                        .color(theme.selected)
                        .width(2.0),
                );
            });
    });
}
