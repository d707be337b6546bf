//! # Shared Display Helpers
//!
//! Small formatting functions used by several screens.
//!
//! - [`format_coordinates`] - Render a coordinate pair for badges
//! - [`truncate_text`] - Shorten card descriptions without splitting characters
//! - [`format_rupees`] - Render a price per quintal
//!
//! ```rust
//! use shared::utils::truncate_text;
//!
//! assert_eq!(truncate_text("सोयाबीन की कीमतें", 7), "सोयाबीन...");
//! ```

use crate::dto::geo::Coordinates;

/// Format coordinates with four decimals, e.g. `23.2599°N, 77.4126°E`.
pub fn format_coordinates(coords: &Coordinates) -> String {
    let ns = if coords.lat >= 0.0 { 'N' } else { 'S' };
    let ew = if coords.lon >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}°{}, {:.4}°{}",
        coords.lat.abs(),
        ns,
        coords.lon.abs(),
        ew
    )
}

/// Keep at most `max_chars` characters, appending `...` when shortened.
///
/// Counts `char`s rather than bytes so Devanagari text is never cut mid-codepoint.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_chars).collect();
    format!("{}...", prefix)
}

/// Format a price as `₹2,250`.
pub fn format_rupees(amount: f64) -> String {
    let whole = amount.round() as i64;
    let negative = whole < 0;
    let digits = whole.abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates() {
        assert_eq!(
            format_coordinates(&Coordinates::FALLBACK),
            "23.2599°N, 77.4126°E"
        );
        assert_eq!(
            format_coordinates(&Coordinates::new(-33.5, -70.25)),
            "33.5000°S, 70.2500°W"
        );
    }

    #[test]
    fn test_truncate_text_short() {
        assert_eq!(truncate_text("Wheat", 10), "Wheat");
    }

    #[test]
    fn test_truncate_text_multibyte() {
        let text = "पीएम-किसान 17वीं किस्त";
        let out = truncate_text(text, 4);
        assert_eq!(out.chars().count(), 7);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(2250.0), "₹2,250");
        assert_eq!(format_rupees(999.4), "₹999");
        assert_eq!(format_rupees(1234567.0), "₹1,234,567");
    }
}
