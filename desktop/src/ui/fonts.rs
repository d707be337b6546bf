//! # Font Configuration
//!
//! egui's bundled fonts have no Devanagari glyphs, so Hindi text would render as
//! boxes. At startup we look for a Devanagari face installed on the system and add
//! it as a fallback after the default proportional fonts.

use egui::{Context, FontData, FontDefinitions, FontFamily, FontId, TextStyle, Theme as EguiTheme};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Font name registered for Devanagari glyphs
pub const DEVANAGARI_FONT: &str = "Devanagari";

/// Environment variable naming a font file to use instead of the system search
pub const FONT_PATH_ENV: &str = "MAATIPUTRA_DEVANAGARI_FONT";

/// Common install locations, checked in order.
const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSansDevanagari-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansDevanagari-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSansDevanagari-Regular.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansDevanagari-Regular.otf",
    "/usr/share/fonts/truetype/lohit-devanagari/Lohit-Devanagari.ttf",
    "/usr/share/fonts/truetype/fonts-deva-extra/kalimati.ttf",
    "/System/Library/Fonts/Supplemental/DevanagariMT.ttc",
    "/System/Library/Fonts/Kohinoor.ttc",
    "C:\\Windows\\Fonts\\Nirmala.ttf",
    "C:\\Windows\\Fonts\\mangal.ttf",
];

/// First existing font file among `override_path` and `candidates`.
pub fn find_devanagari_font(override_path: Option<PathBuf>, candidates: &[&str]) -> Option<PathBuf> {
    override_path
        .into_iter()
        .chain(candidates.iter().map(PathBuf::from))
        .find(|path| path.is_file())
}

fn load_font(path: &Path) -> Option<FontData> {
    match std::fs::read(path) {
        Ok(bytes) => Some(FontData::from_owned(bytes)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "[FONT] Could not read font file");
            None
        }
    }
}

/// Install fonts and text sizes.
pub fn setup_fonts(ctx: &Context) {
    let mut font_definitions = FontDefinitions::default();

    let override_path = std::env::var_os(FONT_PATH_ENV).map(PathBuf::from);
    let found = find_devanagari_font(override_path, CANDIDATES);
    match found.as_deref().and_then(|path| load_font(path).map(|data| (path, data))) {
        Some((path, data)) => {
            font_definitions
                .font_data
                .insert(DEVANAGARI_FONT.to_string(), Arc::new(data));
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                font_definitions
                    .families
                    .entry(family)
                    .or_default()
                    .push(DEVANAGARI_FONT.to_string());
            }
            tracing::info!(path = %path.display(), "[FONT] Devanagari fallback font loaded");
        }
        None => {
            tracing::warn!(
                "[FONT] No Devanagari font found; set {} to render Hindi text",
                FONT_PATH_ENV
            );
        }
    }

    ctx.set_fonts(font_definitions);

    for theme in [EguiTheme::Light, EguiTheme::Dark] {
        ctx.style_mut_of(theme, |style| {
            style
                .text_styles
                .insert(TextStyle::Small, FontId::new(12.0, FontFamily::Proportional));
            style
                .text_styles
                .insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
            style
                .text_styles
                .insert(TextStyle::Button, FontId::new(15.0, FontFamily::Proportional));
            style
                .text_styles
                .insert(TextStyle::Heading, FontId::new(24.0, FontFamily::Proportional));
            style
                .text_styles
                .insert(TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("deva.ttf");
        std::fs::write(&font, [0u8; 8]).unwrap();

        let found = find_devanagari_font(Some(font.clone()), &["/definitely/missing.ttf"]);
        assert_eq!(found, Some(font));
    }

    #[test]
    fn test_missing_fonts_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("second.ttf");
        std::fs::write(&font, [0u8; 8]).unwrap();
        let candidate = font.to_string_lossy().into_owned();

        let found = find_devanagari_font(
            Some(dir.path().join("gone.ttf")),
            &["/definitely/missing.ttf", candidate.as_str()],
        );
        assert_eq!(found, Some(font));
        assert_eq!(find_devanagari_font(None, &["/definitely/missing.ttf"]), None);
    }
}
