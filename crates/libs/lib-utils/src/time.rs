//! # Calendar Labels
//!
//! Labels for forecast days, the prediction month and the price history chart,
//! built with chrono.

use chrono::{Datelike, Months, NaiveDate};

/// Turn an ISO date (`2026-10-19`) into a short weekday label (`Mon 19`).
///
/// Unparseable input is returned unchanged so a bad date never blanks the row.
pub fn day_label(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%a %-d").to_string(),
        Err(_) => iso_date.to_string(),
    }
}

/// Full English month name for a date, e.g. `October`.
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Short labels of the `count` months before `today`'s month, oldest first.
///
/// For `today` in October and `count = 6` this yields `Apr` through `Sep`.
pub fn trailing_month_labels(today: NaiveDate, count: u32) -> Vec<String> {
    let first_of_month = today.with_day(1).unwrap_or(today);
    (1..=count)
        .rev()
        .filter_map(|back| first_of_month.checked_sub_months(Months::new(back)))
        .map(|date| date.format("%b").to_string())
        .collect()
}
