//! Display formatting. Only this module rounds; metric values themselves keep
//! full precision.

use chrono::{NaiveDateTime, NaiveTime};

use crate::models::{parse_event_date, MetricUnit};

/// Placeholder for missing or unreadable values.
pub const NOT_AVAILABLE: &str = "N/A";

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Insert `,` every three digits into an unsigned digit string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round to one decimal, halves away from zero (`12.25` → `12.3`).
///
/// `format!("{:.1}")` alone rounds halves to even.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0 + 0.0
}

/// Whole number with thousands separators: `1234567.4` → `"1,234,567"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(&format!("{:.0}", rounded.abs())))
}

/// Percentage with one decimal: `33.333` → `"33.3%"`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.1}%", round_tenths(value))
}

/// Rupee amount compacted to crore, lakh or thousand.
///
/// `25_000_000` → `"₹2.5Cr"`, `150_000` → `"₹1.5L"`, `2_500` → `"₹2.5K"`,
/// `850` → `"₹850"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let body = if abs >= CRORE {
        format!("{:.1}Cr", round_tenths(abs / CRORE))
    } else if abs >= LAKH {
        format!("{:.1}L", round_tenths(abs / LAKH))
    } else if abs >= THOUSAND {
        format!("{:.1}K", round_tenths(abs / THOUSAND))
    } else {
        format!("{:.0}", abs)
    };
    format!("{}₹{}", sign, body)
}

/// Day count with one decimal: `12.25` → `"12.3 days"`.
pub fn format_days(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.1} days", round_tenths(value))
}

pub fn format_metric_value(value: f64, unit: MetricUnit) -> String {
    match unit {
        MetricUnit::Count => format_number(value),
        MetricUnit::Currency => format_currency(value),
        MetricUnit::Percent => format_percent(value),
        MetricUnit::Days => format_days(value),
    }
}

/// 12-hour clock time from a time cell: `"18:30"` → `"6:30 PM"`.
pub fn format_time(raw: Option<&str>) -> String {
    raw.and_then(parse_time_of_day)
        .map(|time| time.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M:%S %p", "%I:%M%p"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .or_else(|| parse_event_date(raw).map(|dt| dt.time()))
}

/// Short date from a date cell: `"2024-03-05"` → `"Mar 5, 2024"`.
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_event_date)
        .map(|dt| format_short_date(&dt))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_short_date(dt: &NaiveDateTime) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// The trimmed text, or [`NOT_AVAILABLE`] when blank.
pub fn or_not_available(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
