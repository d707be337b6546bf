//! # Farm Map Screen
//!
//! Satellite view of the farm. The keyed static image is tried first; if it cannot
//! be loaded the screen reports it and the map driver switches to open imagery
//! tiles, drawn here as a slippy map with a label overlay.

use crate::app::{AppLike, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::{badges, forms, layouts};
use egui::load::{ImagePoll, SizeHint};
use egui::{pos2, vec2, Color32, Rect, Stroke};
use lib_core::map::tiles::{self, TILE_SIZE};
use lib_core::map::{MapPhase, MapSnapshot, MapView, Provider};
use shared::{format_coordinates, Locale};

const MAP_MIN_HEIGHT: f32 = 420.0;

/// Render the farm map
pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
    let theme = Theme::default();
    let locale = state.locale();

    layouts::render_screen_heading(
        ui,
        locale.pick("Farm Map (Satellite)", "खेत का नक्शा (सैटेलाइट)"),
        None,
    );

    let Some(snapshot) = &state.map.snapshot else {
        forms::render_loading(ui, locale.pick("Loading Satellite Map...", "नक्शा लोड हो रहा है..."));
        return;
    };

    render_badges(ui, snapshot, locale);
    ui.add_space(8.0);

    match (&snapshot.phase, &snapshot.view) {
        (MapPhase::Failed { reason }, _) => {
            layouts::render_card(ui, None, |ui| {
                ui.label(
                    egui::RichText::new(locale.pick("Map unavailable", "नक्शा उपलब्ध नहीं है"))
                        .size(18.0)
                        .strong()
                        .color(theme.error),
                );
                forms::render_hint(ui, reason, &theme);
                ui.add_space(8.0);
                if forms::render_primary_button(ui, locale.pick("Retry", "फिर से कोशिश करें"), true).clicked() {
                    app.handle_map_retry();
                }
            });
        }
        (MapPhase::RenderingPrimary, Some(view)) if view.provider == Provider::Primary => {
            render_primary(ui, view, locale, app);
        }
        (MapPhase::RenderingFallback, Some(view)) => {
            render_fallback(ui, view);
        }
        _ => {
            forms::render_loading(ui, locale.pick("Loading Satellite Map...", "नक्शा लोड हो रहा है..."));
        }
    }
}

fn render_badges(ui: &mut egui::Ui, snapshot: &MapSnapshot, locale: Locale) {
    let theme = Theme::default();

    ui.horizontal(|ui| {
        if let Some(provider) = snapshot.provider {
            badges::render_pill(ui, &format!("🛰 {}", provider.label()), theme.colors.forest_green, Color32::WHITE);
        }
        if snapshot.location.is_some() {
            badges::render_location_badge(
                ui,
                snapshot.using_fallback_location(),
                snapshot.location_badge(),
            );
        }
        if let Some(location) = &snapshot.location {
            ui.label(egui::RichText::new(format_coordinates(&location.coords)).color(theme.dim));
        }
        if snapshot.using_fallback_location() {
            ui.label(
                egui::RichText::new(locale.pick(
                    "Turn on location to see your own farm.",
                    "अपना खेत देखने के लिए स्थान चालू करें।",
                ))
                .size(12.0)
                .color(theme.dim),
            );
        }
    });
}

/// Allocate the map area and return a child ui clipped to it.
fn map_area(ui: &mut egui::Ui) -> (Rect, egui::Ui) {
    let size = vec2(ui.available_width(), ui.available_height().max(MAP_MIN_HEIGHT));
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter().rect_filled(rect, egui::CornerRadius::same(8), Color32::from_gray(40));

    let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect));
    child.set_clip_rect(rect);
    (rect, child)
}

fn render_primary(ui: &mut egui::Ui, view: &MapView, locale: Locale, app: &mut impl AppLike) {
    let Some(layer) = view.layers.first() else {
        app.handle_map_primary_failed("no imagery layer".to_string());
        return;
    };

    let (rect, mut map_ui) = map_area(ui);
    match map_ui.ctx().try_load_image(&layer.url, SizeHint::default()) {
        Ok(ImagePoll::Ready { .. }) => {
            egui::Image::from_uri(layer.url.clone())
                .fit_to_exact_size(rect.size())
                .maintain_aspect_ratio(false)
                .paint_at(&map_ui, rect);
            render_marker(&mut map_ui, view, rect.center());
        }
        Ok(ImagePoll::Pending { .. }) => {
            map_ui.put(
                Rect::from_center_size(rect.center(), vec2(240.0, 32.0)),
                egui::Label::new(
                    egui::RichText::new(locale.pick("Loading Satellite Map...", "नक्शा लोड हो रहा है..."))
                        .color(Color32::WHITE),
                ),
            );
            map_ui.ctx().request_repaint_after(std::time::Duration::from_millis(100));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Satellite image failed to load");
            app.handle_map_primary_failed(e.to_string());
        }
    }
}

fn render_fallback(ui: &mut egui::Ui, view: &MapView) {
    let (rect, mut map_ui) = map_area(ui);

    let placed = tiles::covering(
        view.center,
        view.zoom,
        f64::from(rect.width()),
        f64::from(rect.height()),
    );
    let tile_size = vec2(TILE_SIZE as f32, TILE_SIZE as f32);

    // Imagery first, labels on top
    for layer in &view.layers {
        for tile in &placed {
            let min = rect.min + vec2(tile.offset.0 as f32, tile.offset.1 as f32);
            egui::Image::from_uri(tile.id.url(&layer.url))
                .paint_at(&map_ui, Rect::from_min_size(min, tile_size));
        }
    }

    render_marker(&mut map_ui, view, rect.center());

    let attribution = view
        .layers
        .iter()
        .filter_map(|layer| layer.attribution.as_deref())
        .collect::<Vec<_>>()
        .join(" | ");
    if !attribution.is_empty() {
        let galley_rect = Rect::from_min_max(pos2(rect.min.x, rect.max.y - 18.0), rect.max);
        map_ui
            .painter()
            .rect_filled(galley_rect, 0.0, Color32::from_black_alpha(140));
        map_ui.painter().text(
            pos2(rect.max.x - 6.0, rect.max.y - 9.0),
            egui::Align2::RIGHT_CENTER,
            attribution,
            egui::FontId::proportional(10.0),
            Color32::from_gray(220),
        );
    }
}

fn render_marker(ui: &mut egui::Ui, view: &MapView, at: egui::Pos2) {
    let marker = &view.marker;

    // The pin falls into place the first time it is shown
    let drop = if marker.animated_drop {
        let now = ui.input(|i| i.time);
        let id = egui::Id::new("farm_marker_drop");
        let started = ui
            .ctx()
            .data_mut(|d| *d.get_temp_mut_or_insert_with(id, || now));
        let t = ((now - started) / 0.6).clamp(0.0, 1.0) as f32;
        if t < 1.0 {
            ui.ctx().request_repaint();
        }
        (1.0 - t) * 40.0
    } else {
        0.0
    };
    let head = at - vec2(0.0, 18.0 + drop);

    let painter = ui.painter();
    painter.line_segment([head, at - vec2(0.0, drop)], Stroke::new(3.0, Color32::from_rgb(185, 28, 28)));
    painter.circle(head, 9.0, Color32::from_rgb(220, 38, 38), Stroke::new(2.0, Color32::WHITE));

    let hover = Rect::from_center_size(head, vec2(24.0, 24.0));
    let response = ui.interact(hover, ui.id().with("farm_marker"), egui::Sense::hover());
    let tip = marker.popup.as_deref().unwrap_or(&marker.title);
    response.on_hover_text(tip);
}
