//! # GUI Theme
//!
//! Light field-green theme for egui: cream panels, leaf-green accents, amber for
//! warnings and demo badges.

use egui::Theme as EguiTheme;
use egui::{Color32, Context, Stroke, Visuals};
use shared::Trend;

/// Maatiputra color palette
#[derive(Clone)]
pub struct FarmColors {
    /// Page background
    pub background: Color32,
    /// Card and panel fill
    pub surface: Color32,
    /// Body text
    pub text: Color32,
    /// Primary accent (buttons, selected sidebar entry)
    pub leaf_green: Color32,
    /// Darker accent for headings
    pub forest_green: Color32,
    /// Pale green for hovered widgets and chips
    pub mint: Color32,
    /// Card borders
    pub border: Color32,
    /// Positive outcomes (healthy leaf, rising price)
    pub green_success: Color32,
    /// Errors and disease
    pub red_error: Color32,
    /// Warnings and the demo badge
    pub amber_warning: Color32,
    /// Links and info
    pub blue_info: Color32,
    /// Secondary text
    pub gray_secondary: Color32,
}

impl Default for FarmColors {
    fn default() -> Self {
        FarmColors {
            background: Color32::from_rgb(247, 249, 242), // #F7F9F2
            surface: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(31, 41, 35),          // #1F2923
            leaf_green: Color32::from_rgb(22, 163, 74),   // #16A34A
            forest_green: Color32::from_rgb(20, 83, 45),  // #14532D
            mint: Color32::from_rgb(220, 252, 231),       // #DCFCE7
            border: Color32::from_rgb(214, 222, 208),
            green_success: Color32::from_rgb(21, 128, 61),
            red_error: Color32::from_rgb(220, 38, 38),
            amber_warning: Color32::from_rgb(217, 119, 6),
            blue_info: Color32::from_rgb(37, 99, 235),
            gray_secondary: Color32::from_rgb(107, 114, 128),
        }
    }
}

/// Application theme
pub struct Theme {
    /// Color palette
    pub colors: FarmColors,
    /// Normal text color
    pub normal: Color32,
    /// Selected/highlighted items
    pub selected: Color32,
    /// Headings
    pub heading: Color32,
    /// Border color
    pub border: Color32,
    /// Dimmed/secondary text
    pub dim: Color32,
    pub success: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub info: Color32,
    /// Card fill
    pub card: Color32,
    /// Chip and badge fill
    pub chip: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        let colors = FarmColors::default();
        Theme {
            colors: colors.clone(),
            normal: colors.text,
            selected: colors.leaf_green,
            heading: colors.forest_green,
            border: colors.border,
            dim: colors.gray_secondary,
            success: colors.green_success,
            error: colors.red_error,
            warning: colors.amber_warning,
            info: colors.blue_info,
            card: colors.surface,
            chip: colors.mint,
        }
    }
}

impl Theme {
    /// Color for a price trend
    pub fn trend_color(&self, trend: Trend) -> Color32 {
        match trend {
            Trend::Up => self.success,
            Trend::Down => self.error,
            Trend::Stable => self.dim,
        }
    }

    /// Format a percentage change with its color
    pub fn format_change(&self, change: f64) -> (String, Color32) {
        if change > 0.0 {
            (format!("+{:.1}%", change), self.success)
        } else if change < 0.0 {
            (format!("{:.1}%", change), self.error)
        } else {
            ("0.0%".to_string(), self.dim)
        }
    }

    /// egui Visuals for the field-green theme
    pub fn farm_visuals() -> Visuals {
        let colors = FarmColors::default();
        let mut visuals = Visuals::light();

        visuals.override_text_color = Some(colors.text);

        visuals.faint_bg_color = colors.background;
        visuals.extreme_bg_color = colors.surface;
        visuals.panel_fill = colors.background;
        visuals.window_fill = colors.surface;
        visuals.window_stroke = Stroke::new(1.0, colors.border);

        visuals.widgets.noninteractive.bg_fill = colors.surface;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text);

        visuals.widgets.inactive.bg_fill = colors.surface;
        visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(240, 244, 236);
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.border);

        visuals.widgets.hovered.bg_fill = colors.mint;
        visuals.widgets.hovered.weak_bg_fill = colors.mint;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.5, colors.leaf_green);

        visuals.widgets.active.bg_fill = Color32::from_rgb(187, 247, 208);
        visuals.widgets.active.weak_bg_fill = Color32::from_rgb(187, 247, 208);
        visuals.widgets.active.bg_stroke = Stroke::new(2.0, colors.forest_green);

        visuals.widgets.open.bg_fill = colors.mint;
        visuals.widgets.open.bg_stroke = Stroke::new(1.5, colors.leaf_green);

        visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(22, 163, 74, 60);
        visuals.selection.stroke = Stroke::new(1.5, colors.forest_green);

        visuals.hyperlink_color = colors.blue_info;
        visuals.slider_trailing_fill = true;

        visuals
    }

    /// Apply the theme to both egui themes, so a system dark mode does not undo it.
    pub fn apply(ctx: &Context) {
        let visuals = Self::farm_visuals();

        for theme in [EguiTheme::Light, EguiTheme::Dark] {
            ctx.style_mut_of(theme, |style| {
                style.visuals = visuals.clone();
                style.spacing.item_spacing = egui::Vec2::new(8.0, 6.0);
                style.spacing.button_padding = egui::Vec2::new(12.0, 6.0);
                style.spacing.window_margin = egui::Margin::same(8);
                style.spacing.interact_size = egui::Vec2::new(32.0, 28.0);
            });
        }
        ctx.set_theme(EguiTheme::Light);

        tracing::debug!("Applied field-green theme");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_formatting() {
        let theme = Theme::default();
        assert_eq!(theme.format_change(4.26), ("+4.3%".to_string(), theme.success));
        assert_eq!(theme.format_change(-2.0), ("-2.0%".to_string(), theme.error));
        assert_eq!(theme.format_change(0.0).0, "0.0%");
    }

    #[test]
    fn test_trend_colors() {
        let theme = Theme::default();
        assert_eq!(theme.trend_color(Trend::Up), theme.success);
        assert_eq!(theme.trend_color(Trend::Stable), theme.dim);
    }
}
