//! The filter pipeline.
//!
//! Stages run in a fixed order, each narrowing the previous stage's output:
//! location, trainer, class, product, time slot, timeframe. A stage whose
//! selector is "all" passes records through untouched; an active stage never
//! treats a missing value as a match.

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

use super::criteria::{DateRange, FilterCriteria, Selection, TimeSlot, Timeframe};
use super::locations::LocationCatalog;
use crate::models::{end_of_day, start_of_day, FilterableRecord};

/// Lower bound used by the custom timeframe when only an end date is given.
pub fn custom_range_floor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .map(start_of_day)
        .unwrap_or(NaiveDateTime::MIN)
}

/// Categorical columns matched by exact, case-sensitive equality.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Category {
    Trainer,
    Class,
    Product,
}

impl Category {
    pub fn value_of<'r, R: FilterableRecord>(&self, record: &'r R) -> Option<&'r str> {
        match self {
            Category::Trainer => record.trainer(),
            Category::Class => record.class_name(),
            Category::Product => record.product(),
        }
    }
}

/// Keep records whose location contains any alias of the selected bucket.
///
/// A bucket id that the catalog does not know passes everything through.
pub fn filter_by_location<R: FilterableRecord + Clone>(
    records: &[R],
    location: &Selection<String>,
    catalog: &LocationCatalog,
) -> Vec<R> {
    let Some(bucket_id) = location.as_only() else {
        return records.to_vec();
    };
    let Some(bucket) = catalog.get(bucket_id) else {
        debug!("Unknown location bucket '{}', passing records through", bucket_id);
        return records.to_vec();
    };

    records
        .iter()
        .filter(|r| r.location().map(|l| bucket.matches(l)).unwrap_or(false))
        .cloned()
        .collect()
}

/// Keep records whose category column equals the selected value exactly.
pub fn filter_by_category<R: FilterableRecord + Clone>(
    records: &[R],
    category: Category,
    selection: &Selection<String>,
) -> Vec<R> {
    let Some(wanted) = selection.as_only() else {
        return records.to_vec();
    };

    records
        .iter()
        .filter(|r| category.value_of(*r) == Some(wanted.as_str()))
        .cloned()
        .collect()
}

/// Keep records whose hour falls inside the selected time slot.
pub fn filter_by_time_slot<R: FilterableRecord + Clone>(
    records: &[R],
    slot: &Selection<TimeSlot>,
) -> Vec<R> {
    let Some(slot) = slot.as_only() else {
        return records.to_vec();
    };

    records
        .iter()
        .filter(|r| r.hour().map(|h| slot.contains_hour(h)).unwrap_or(false))
        .cloned()
        .collect()
}

/// Keep records whose date falls inside the selected timeframe.
///
/// The custom branch is the terminal predicate of this stage: with both
/// bounds unset it keeps every record with a readable date; otherwise an
/// unset start falls back to [`custom_range_floor`] and an unset end to `now`.
pub fn filter_by_timeframe<R: FilterableRecord + Clone>(
    records: &[R],
    timeframe: Timeframe,
    range: &DateRange,
    now: NaiveDateTime,
) -> Vec<R> {
    match timeframe {
        Timeframe::All => records.to_vec(),
        Timeframe::Custom => {
            if range.is_unbounded() {
                return retain_dated(records, |_| true);
            }
            let start = range.start.map(start_of_day).unwrap_or_else(custom_range_floor);
            let end = range.end.map(end_of_day).unwrap_or(now);
            retain_dated(records, |d| d >= start && d <= end)
        }
        relative => {
            let start = relative.shift_back(now).unwrap_or(NaiveDateTime::MIN);
            retain_dated(records, |d| d >= start && d <= now)
        }
    }
}

fn retain_dated<R, F>(records: &[R], keep: F) -> Vec<R>
where
    R: FilterableRecord + Clone,
    F: Fn(NaiveDateTime) -> bool,
{
    records
        .iter()
        .filter(|r| r.parsed_date().map(&keep).unwrap_or(false))
        .cloned()
        .collect()
}

/// Run every stage of the pipeline against `records`.
pub fn apply_filters<R: FilterableRecord + Clone>(
    records: &[R],
    criteria: &FilterCriteria,
    catalog: &LocationCatalog,
    now: NaiveDateTime,
) -> Vec<R> {
    let mut filtered = filter_by_location(records, &criteria.location, catalog);
    filtered = filter_by_category(&filtered, Category::Trainer, &criteria.trainer);
    filtered = filter_by_category(&filtered, Category::Class, &criteria.class_name);
    filtered = filter_by_category(&filtered, Category::Product, &criteria.product);
    filtered = filter_by_time_slot(&filtered, &criteria.time_slot);
    filtered = filter_by_timeframe(&filtered, criteria.timeframe, &criteria.date_range, now);

    debug!(
        "Filter pipeline kept {} of {} records",
        filtered.len(),
        records.len()
    );
    filtered
}

/// Criteria bound to a location catalog and a fixed "now".
///
/// Handy when the same criteria are applied to several collections within
/// one recomputation, so that every collection sees the same clock reading.
#[derive(Debug, Clone, Copy)]
pub struct FilterPipeline<'a> {
    criteria: &'a FilterCriteria,
    catalog: &'a LocationCatalog,
    now: NaiveDateTime,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(criteria: &'a FilterCriteria, catalog: &'a LocationCatalog, now: NaiveDateTime) -> Self {
        Self {
            criteria,
            catalog,
            now,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.criteria
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn apply<R: FilterableRecord + Clone>(&self, records: &[R]) -> Vec<R> {
        apply_filters(records, self.criteria, self.catalog, self.now)
    }

    /// Only the location stage; this is what filter option lists are built from.
    pub fn apply_location<R: FilterableRecord + Clone>(&self, records: &[R]) -> Vec<R> {
        filter_by_location(records, &self.criteria.location, self.catalog)
    }
}

#[cfg(test)]
#[path = "filtering_tests.rs"]
mod filtering_tests;
