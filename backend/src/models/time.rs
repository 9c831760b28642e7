//! Date and time-of-day parsing for spreadsheet cells.
//!
//! Source sheets are filled by hand, so the same column can hold ISO
//! timestamps, plain dates or day-first dates. Every parser here returns
//! `None` instead of an error: a cell that cannot be read simply does not
//! match any stage that needs it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Accepted date-time layouts, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// Accepted date-only layouts, tried in order. Dates map to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%b %d, %Y"];

/// Parse an event date cell into a wall-clock timestamp.
///
/// RFC 3339 values keep their wall-clock reading (the offset is dropped), since
/// every studio reports in a single local timezone.
pub fn parse_event_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(dt) = parse_event_timestamp(raw) {
        return Some(dt);
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(start_of_day(date));
        }
    }

    None
}

/// Parse a cell that carries a time of day as well as a date.
///
/// Date-only cells return `None`, so their midnight is never read as an hour.
pub fn parse_event_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    // Fractional seconds show up in some exports ("2024-03-01 10:15:00.000").
    let without_fraction = raw.split('.').next().unwrap_or(raw);
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(without_fraction, format).ok())
}

/// Parse the hour component of a time-of-day cell.
///
/// Reads the leading digits before the first `:` ("18:30" → 18, "7:05" → 7).
/// A trailing AM/PM marker is honoured ("6:30 PM" → 18, "12:10 am" → 0).
/// Hours outside 0..24 are treated as unparseable.
pub fn parse_hour(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let head = raw.split(':').next()?.trim();
    let digits: String = head.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let mut hour: u32 = digits.parse().ok()?;

    let lower = raw.to_ascii_lowercase();
    if lower.ends_with("pm") && hour < 12 {
        hour += 12;
    } else if lower.ends_with("am") && hour == 12 {
        hour = 0;
    }

    (hour < 24).then_some(hour)
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable instant of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    date.and_time(last)
}

/// Hour of a parsed timestamp, used when a record only carries a full date-time.
pub fn hour_of(dt: &NaiveDateTime) -> u32 {
    dt.hour()
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
