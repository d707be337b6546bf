//! # Dashboard Screen
//!
//! Greeting, location toggle, weather widget, shortcuts to the advisory tools,
//! agriculture news and a static mandi rate table.

use crate::app::{is_recently_copied, AppLike, AppState, Screen, COPIED_BADGE};
use crate::ui::theme::Theme;
use crate::ui::widgets::{badges, forms, layouts};
use shared::{truncate_text, Locale, NewsArticle, NewsCategory, NewsFilter, WeatherSnapshot};

/// Reference rates shown under "Mandi Rates": crop, mandi, ₹/quintal, 24h change
const MANDI_RATES: &[(&str, &str, f64, f64)] = &[
    ("Wheat (Gehu)", "Indore Mandi", 2125.0, 2.4),
    ("Soybean", "Ujjain Mandi", 4850.0, -1.1),
    ("Cotton (Kapas)", "Bhopal Mandi", 7210.0, 0.8),
];

/// Render the dashboard
pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let locale = state.locale();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            render_header(ui, state, app);
            ui.add_space(12.0);

            ui.columns(3, |columns| {
                render_weather_widget(&mut columns[0], state, locale);
                render_shortcut(
                    &mut columns[1],
                    "🌱",
                    locale.pick("Check Soil Health", "मृदा स्वास्थ्य जांचें"),
                    locale.pick(
                        "Get fertilizer recommendations from Soil Health Card.",
                        "मृदा स्वास्थ्य कार्ड से उर्वरक सिफारिशें प्राप्त करें।",
                    ),
                    "AI Analysis Ready",
                    Screen::Soil,
                    app,
                );
                render_shortcut(
                    &mut columns[2],
                    "🍃",
                    locale.pick("Scan Crop for Disease", "फसल रोग स्कैन करें"),
                    locale.pick(
                        "Take a photo to detect diseases instantly.",
                        "रोगों का पता लगाने के लिए फोटो लें।",
                    ),
                    "Vision AI Active",
                    Screen::Leaf,
                    app,
                );
            });

            ui.add_space(16.0);
            render_news(ui, state, app);
            ui.add_space(16.0);
            render_mandi_rates(ui, locale, app);
        });
}

fn render_header(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();
    let enabled = state.location_enabled();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            let name = state.session.as_ref().map(|u| u.name.as_str()).unwrap_or_default();
            ui.label(
                egui::RichText::new(format!("{}, {} 🙏", locale.pick("Namaste", "नमस्ते"), name))
                    .size(24.0)
                    .strong(),
            );
            ui.label(
                egui::RichText::new(locale.pick(
                    "Your farm status and latest updates.",
                    "आपके खेत की स्थिति और ताज़ा अपडेट।",
                ))
                .color(theme.dim),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(user) = &state.session {
                badges::render_pill(ui, &user.kisan_id, theme.colors.text, egui::Color32::WHITE);
            }
            let label = if enabled {
                locale.pick("📍 Location: ON", "📍 स्थान: चालू")
            } else {
                locale.pick("📍 Location: OFF", "📍 स्थान: बंद")
            };
            let fill = if enabled { theme.chip } else { theme.card };
            if ui.add(egui::Button::new(label).fill(fill)).clicked() {
                app.handle_location_toggle();
            }
        });
    });
}

fn render_weather_widget(ui: &mut egui::Ui, state: &AppState, locale: Locale) {
    let theme = Theme::default();
    let dashboard = &state.dashboard;

    egui::Frame::new()
        .fill(egui::Color32::from_rgb(30, 64, 175))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(150.0);
            match (&dashboard.weather, dashboard.weather_loading) {
                (Some(weather), _) => weather_body(ui, weather, locale),
                (None, true) => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                }
                (None, false) => {
                    ui.label(egui::RichText::new("—").color(theme.chip));
                }
            }
        });
}

fn weather_body(ui: &mut egui::Ui, weather: &WeatherSnapshot, locale: Locale) {
    let white = egui::Color32::WHITE;
    let soft = egui::Color32::from_rgb(191, 219, 254);

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("LIVE WEATHER").size(11.0).strong().color(soft));
        if weather.is_demo {
            badges::render_demo_badge(ui, locale);
        }
    });
    ui.label(egui::RichText::new(format!("{}°", weather.temp)).size(44.0).strong().color(white));
    ui.label(egui::RichText::new(weather.condition.to_uppercase()).size(16.0).color(white));
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!(
                "{} {:.0}%   {} {:.0} km/h",
                locale.pick("Humidity", "नमी"),
                weather.humidity,
                locale.pick("Wind", "हवा"),
                weather.wind_speed
            ))
            .color(soft),
        );
    });
    ui.label(egui::RichText::new(format!("📍 {}", weather.location)).color(soft));
}

fn render_shortcut(
    ui: &mut egui::Ui,
    icon: &str,
    title: &str,
    body: &str,
    tag: &str,
    target: Screen,
    app: &mut impl AppLike,
) {
    let theme = Theme::default();
    let response = egui::Frame::new()
        .fill(theme.card)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(150.0);
            ui.label(egui::RichText::new(icon).size(28.0));
            ui.label(egui::RichText::new(title).size(18.0).strong());
            ui.label(egui::RichText::new(body).color(theme.dim));
            ui.add_space(6.0);
            badges::render_pill(ui, tag, theme.chip, theme.heading);
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    if response.clicked() {
        app.handle_screen_change(target);
    }
}

fn category_color(category: NewsCategory) -> egui::Color32 {
    match category {
        NewsCategory::Scheme => egui::Color32::from_rgb(147, 51, 234),
        NewsCategory::Market => egui::Color32::from_rgb(234, 88, 12),
        NewsCategory::Tech => egui::Color32::from_rgb(37, 99, 235),
        NewsCategory::Weather => egui::Color32::from_rgb(75, 85, 99),
    }
}

fn render_news(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();
    let dashboard = &state.dashboard;

    layouts::render_card(ui, None, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(locale.pick("Agriculture News", "कृषि समाचार"))
                        .size(20.0)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new("Updated hourly • From major sources")
                        .size(11.0)
                        .color(theme.dim),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for filter in NewsFilter::all().iter().rev() {
                    let label = match filter {
                        NewsFilter::All => locale.pick("All", "सभी"),
                        other => other.label(),
                    };
                    if ui.selectable_label(dashboard.filter == *filter, label).clicked() {
                        app.handle_news_filter(*filter);
                    }
                }
            });
        });
        ui.add_space(10.0);

        if dashboard.news_loading {
            forms::render_loading(ui, locale.pick("Loading news...", "समाचार लोड हो रहे हैं..."));
            return;
        }
        if let Some(error) = &dashboard.news_error {
            forms::render_error(ui, error, &theme);
            return;
        }

        let articles: Vec<&NewsArticle> = dashboard
            .news
            .iter()
            .filter(|article| dashboard.filter.matches(article))
            .collect();
        if articles.is_empty() {
            ui.label(
                egui::RichText::new("No news articles found for this category.").color(theme.dim),
            );
            return;
        }

        let featured = dashboard.filter == NewsFilter::All;
        let mut rest = articles.as_slice();
        if featured {
            if let Some((first, others)) = rest.split_first() {
                render_featured(ui, first, app);
                ui.add_space(10.0);
                rest = others;
            }
        }
        for article in rest {
            render_article(ui, state, article, app);
            ui.separator();
        }
    });
}

fn render_featured(ui: &mut egui::Ui, article: &NewsArticle, app: &mut impl AppLike) {
    let theme = Theme::default();
    let response = egui::Frame::new()
        .fill(theme.colors.forest_green)
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            badges::render_pill(ui, "Featured Update", theme.selected, egui::Color32::WHITE);
            ui.label(
                egui::RichText::new(&article.title)
                    .size(20.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            );
            ui.label(egui::RichText::new(&article.description).color(theme.chip));
            ui.label(
                egui::RichText::new(format!("{} • {}", article.source, article.published_at))
                    .size(12.0)
                    .color(theme.chip),
            );
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    if response.clicked() && article.has_link() {
        app.handle_open_link(article.url.clone());
    }
}

fn render_article(ui: &mut egui::Ui, state: &AppState, article: &NewsArticle, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();

    ui.horizontal(|ui| {
        if !article.image_url.is_empty() {
            ui.add(
                egui::Image::from_uri(article.image_url.clone())
                    .fit_to_exact_size(egui::vec2(120.0, 80.0))
                    .corner_radius(egui::CornerRadius::same(8)),
            );
        }
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                badges::render_pill(
                    ui,
                    article.category.label(),
                    category_color(article.category),
                    egui::Color32::WHITE,
                );
                ui.label(
                    egui::RichText::new(format!("{} • {}", article.source, article.published_at))
                        .size(12.0)
                        .color(theme.dim),
                );
            });
            ui.label(egui::RichText::new(&article.title).size(16.0).strong());
            ui.label(egui::RichText::new(truncate_text(&article.description, 140)).color(theme.dim));

            ui.horizontal(|ui| {
                if article.has_link()
                    && ui
                        .link(format!("{} ↗", locale.pick("Read More", "विस्तार से")))
                        .clicked()
                {
                    app.handle_open_link(article.url.clone());
                }

                if is_recently_copied(state, &article.id) {
                    ui.label(egui::RichText::new("✔ Copied!").color(theme.success));
                    ui.ctx().request_repaint_after(COPIED_BADGE);
                } else if ui
                    .small_button("📋")
                    .on_hover_text(locale.pick("Copy link", "लिंक कॉपी करें"))
                    .clicked()
                {
                    ui.ctx().copy_text(article.url.clone());
                    app.handle_link_copied(article.id.clone());
                }
            });
        });
    });
}

fn render_mandi_rates(ui: &mut egui::Ui, locale: Locale, app: &mut impl AppLike) {
    let theme = Theme::default();

    layouts::render_card(ui, None, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(locale.pick("Mandi Rates", "मंडी भाव")).size(18.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.link(format!("{} →", locale.pick("View All", "सभी देखें"))).clicked() {
                    app.handle_screen_change(Screen::Price);
                }
            });
        });
        ui.add_space(8.0);

        egui::Grid::new("mandi_rates")
            .num_columns(4)
            .spacing([32.0, 8.0])
            .striped(true)
            .show(ui, |ui| {
                for header in ["Crop Type", "Location", "Market Price", "24h Change"] {
                    ui.label(egui::RichText::new(header).size(12.0).strong().color(theme.dim));
                }
                ui.end_row();

                for (crop, mandi, price, change) in MANDI_RATES {
                    ui.label(egui::RichText::new(*crop).strong());
                    ui.label(format!("📍 {}", mandi));
                    ui.label(format!("{} /Q", shared::format_rupees(*price)));
                    let (text, color) = theme.format_change(*change);
                    let arrow = if *change >= 0.0 { "▲" } else { "▼" };
                    ui.label(egui::RichText::new(format!("{} {}", arrow, text)).color(color));
                    ui.end_row();
                }
            });
    });
}
