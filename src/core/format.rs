//! Currency and date formatting for the visual document.
//!
//! The display convention is fixed (EUR, comma digit grouping, dot
//! decimal mark, dd.mm.yyyy dates) — locale negotiation is out of scope.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a monetary amount for display: two fractional digits, digit
/// grouping, trailing euro sign — `1,250.00 €`. Midpoints round away
/// from zero (kaufmännisches Runden).
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let s = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part} €")
}

/// Format a date for display: `15.06.2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Format a date as ISO 8601: `2024-06-15`.
pub fn format_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
