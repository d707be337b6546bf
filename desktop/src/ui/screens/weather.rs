//! # Weather Forecast Screen
//!
//! Seven-day forecast for the farmer's location, or for the default farm
//! location when location access is off or unavailable.

use crate::app::AppState;
use crate::ui::theme::Theme;
use crate::ui::widgets::{badges, forms, layouts};
use lib_core::weather::{farm_outlook, wmo, Forecast};
use shared::{ForecastDay, Locale, WeatherSnapshot};

/// Render the forecast screen
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let locale = state.locale();
    let weather = &state.weather;

    layouts::render_screen_heading(ui, locale.pick("Weather Forecast", "मौसम पूर्वानुमान"), None);

    if weather.loading && weather.forecast.is_none() {
        forms::render_loading(ui, locale.pick("Loading forecast...", "पूर्वानुमान लोड हो रहा है..."));
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if let Some(forecast) = &weather.forecast {
                render_location(ui, forecast, locale);
                ui.add_space(8.0);
            }
            if let Some(current) = &weather.current {
                render_current(ui, current, locale);
                ui.add_space(12.0);
            }
            if let Some(forecast) = &weather.forecast {
                render_days(ui, &forecast.days, locale);
            }
        });
}

fn render_location(ui: &mut egui::Ui, forecast: &Forecast, locale: Locale) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("📍 {}", forecast.location_label)).strong());
        let badge = if forecast.using_fallback {
            locale.pick("Default Location", "डिफ़ॉल्ट स्थान")
        } else {
            locale.pick("Live Location", "लाइव स्थान")
        };
        badges::render_location_badge(ui, forecast.using_fallback, badge);
    });
}

fn render_current(ui: &mut egui::Ui, current: &WeatherSnapshot, locale: Locale) {
    let theme = Theme::default();

    layouts::render_card(ui, None, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("{}°C", current.temp)).size(40.0).strong());
            ui.add_space(12.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&current.condition).size(18.0).strong());
                ui.label(
                    egui::RichText::new(format!(
                        "{} {:.0}%  •  {} {:.0} km/h",
                        locale.pick("Humidity", "नमी"),
                        current.humidity,
                        locale.pick("Wind", "हवा"),
                        current.wind_speed
                    ))
                    .color(theme.dim),
                );
            });
            if current.is_demo {
                badges::render_demo_badge(ui, locale);
            }
        });
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(format!(
                "🌾 {}{}",
                locale.pick("Outlook: ", "आज का सुझाव: "),
                farm_outlook(current, locale)
            ))
            .color(theme.heading),
        );
    });
}

fn render_days(ui: &mut egui::Ui, days: &[ForecastDay], locale: Locale) {
    let theme = Theme::default();

    layouts::render_card(ui, Some(locale.pick("Next 7 Days", "अगले 7 दिन")), |ui| {
        if days.is_empty() {
            forms::render_hint(
                ui,
                locale.pick("Forecast unavailable right now.", "पूर्वानुमान अभी उपलब्ध नहीं है।"),
                &theme,
            );
            return;
        }

        egui::Grid::new("forecast_days")
            .num_columns(4)
            .spacing([28.0, 10.0])
            .striped(true)
            .show(ui, |ui| {
                for day in days {
                    ui.label(egui::RichText::new(&day.date).strong());
                    ui.label(wmo::describe(day.code));
                    ui.label(
                        egui::RichText::new(format!("💧 {:.1} mm", day.rain)).color(theme.info),
                    );
                    ui.label(format!("{:.0}° / {:.0}°", day.max_temp, day.min_temp));
                    ui.end_row();
                }
            });
    });
}
