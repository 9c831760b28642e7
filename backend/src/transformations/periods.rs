//! Current/previous period windows for comparative metrics.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::criteria::{DateRange, Timeframe};
use crate::models::{end_of_day, start_of_day, FilterableRecord};

/// A span of time. `end_inclusive` distinguishes `[start, end]` from `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub end_inclusive: bool,
}

impl DateWindow {
    pub fn closed(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            end_inclusive: true,
        }
    }

    pub fn half_open(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            end_inclusive: false,
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && if self.end_inclusive { at <= self.end } else { at < self.end }
    }

    /// Records whose date falls in this window. Undated records never do.
    pub fn select<R: FilterableRecord + Clone>(&self, records: &[R]) -> Vec<R> {
        records
            .iter()
            .filter(|r| r.parsed_date().map(|d| self.contains(d)).unwrap_or(false))
            .cloned()
            .collect()
    }
}

/// The window the metrics describe and the one they are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPair {
    pub current: DateWindow,
    pub previous: DateWindow,
}

/// Work out the comparison windows for a timeframe selection.
///
/// - Relative windows compare `[now - w, now]` with the equally long window
///   right before it.
/// - A custom range with both bounds compares against the same number of
///   days immediately before its start.
/// - Everything else (all, open-ended custom) compares the current calendar
///   month to date with the whole previous calendar month.
pub fn comparison_windows(timeframe: Timeframe, range: &DateRange, now: NaiveDateTime) -> PeriodPair {
    if let Some(start) = timeframe.shift_back(now) {
        let previous_start = timeframe.shift_back(start).unwrap_or(NaiveDateTime::MIN);
        return PeriodPair {
            current: DateWindow::closed(start, now),
            previous: DateWindow::half_open(previous_start, start),
        };
    }

    if let (Timeframe::Custom, Some(start), Some(end)) = (timeframe, range.start, range.end) {
        let current_start = start_of_day(start);
        let current_end = end_of_day(end);
        let length = end.signed_duration_since(start) + chrono::TimeDelta::days(1);
        let previous_start = current_start
            .checked_sub_signed(length)
            .unwrap_or(NaiveDateTime::MIN);
        return PeriodPair {
            current: DateWindow::closed(current_start, current_end),
            previous: DateWindow::half_open(previous_start, current_start),
        };
    }

    month_over_month(now)
}

fn month_over_month(now: NaiveDateTime) -> PeriodPair {
    let month_start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .map(start_of_day)
        .unwrap_or(now);
    let previous_start = month_start
        .checked_sub_months(Months::new(1))
        .unwrap_or(NaiveDateTime::MIN);
    PeriodPair {
        current: DateWindow::closed(month_start, now),
        previous: DateWindow::half_open(previous_start, month_start),
    }
}
