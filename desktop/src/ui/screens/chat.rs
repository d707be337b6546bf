//! # Sahayak Chat Screen
//!
//! Conversation with the farming assistant. A weather card at the top shows the
//! conditions the assistant is working with.

use crate::app::{AppLike, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::badges;
use lib_core::weather::farm_outlook;
use shared::{ChatMessage, ChatRole, Locale, WeatherSnapshot};

/// Render the chat screen
pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();
    let chat = &state.chat;

    match &chat.weather {
        Some(weather) => render_weather_card(ui, weather, locale),
        None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new(locale.pick("Checking weather...", "मौसम देखा जा रहा है...")).color(theme.dim));
            });
        }
    }
    ui.add_space(8.0);

    let input_height = 48.0;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height((ui.available_height() - input_height).max(100.0))
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in chat.session.messages() {
                render_message(ui, message, app);
                ui.add_space(6.0);
            }
            if chat.session.is_in_flight() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        egui::RichText::new(locale.pick("Sahayak is thinking...", "सहायक सोच रहा है..."))
                            .italics()
                            .color(theme.dim),
                    );
                });
            }
        });

    ui.separator();
    render_input(ui, state, app);
}

fn render_weather_card(ui: &mut egui::Ui, weather: &WeatherSnapshot, locale: Locale) {
    let theme = Theme::default();

    egui::Frame::new()
        .fill(theme.chip)
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(14, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("{}°C", weather.temp)).size(22.0).strong());
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&weather.condition).strong());
                    ui.label(egui::RichText::new(format!("📍 {}", weather.location)).size(12.0).color(theme.dim));
                });
                if weather.is_demo {
                    badges::render_demo_badge(ui, locale);
                }
            });
            ui.label(
                egui::RichText::new(format!(
                    "{}{}",
                    locale.pick("Outlook: ", "आज का सुझाव: "),
                    farm_outlook(weather, locale)
                ))
                .color(theme.heading),
            );
        });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage, app: &mut impl AppLike) {
    let theme = Theme::default();
    let from_user = message.role == ChatRole::User;

    let (layout, fill, text_color) = if from_user {
        (
            egui::Layout::right_to_left(egui::Align::TOP),
            theme.selected,
            egui::Color32::WHITE,
        )
    } else {
        (
            egui::Layout::left_to_right(egui::Align::TOP),
            theme.card,
            theme.normal,
        )
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, theme.border))
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_max_width(520.0);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&message.content).color(text_color));
                    if !message.grounding.is_empty() {
                        ui.add_space(4.0);
                        ui.label(egui::RichText::new("Sources").size(11.0).color(theme.dim));
                        for link in &message.grounding {
                            let title = if link.title.is_empty() { &link.uri } else { &link.title };
                            if ui.link(format!("🔗 {}", title)).on_hover_text(&link.uri).clicked() {
                                app.handle_open_link(link.uri.clone());
                            }
                        }
                    }
                });
            });
    });
}

fn render_input(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let locale = state.locale();
    let busy = state.chat.session.is_in_flight();
    let mut input = state.chat.input.clone();
    let mut send = false;

    ui.horizontal(|ui| {
        let response = ui.add_sized(
            [ui.available_width() - 90.0, 34.0],
            egui::TextEdit::singleline(&mut input).hint_text(locale.pick(
                "Ask about mandi rates, weather, or fertilizer...",
                "मंडी भाव, मौसम या खाद के बारे में पूछें...",
            )),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
        let button = egui::Button::new(locale.pick("Send ➤", "भेजें ➤")).min_size(egui::vec2(80.0, 34.0));
        if ui.add_enabled(!busy && !input.trim().is_empty(), button).clicked() {
            send = true;
        }
    });

    if input != state.chat.input {
        app.state().write().chat.input = input;
    }
    if send && !busy {
        app.handle_chat_send();
    }
}
