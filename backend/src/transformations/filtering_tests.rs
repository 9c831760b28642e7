use super::*;
use crate::models::{LateCancellation, SaleRecord};
use crate::transformations::criteria::{DateRange, FilterCriteria, Selection, TimeSlot, Timeframe};
use chrono::NaiveDate;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn cancellation(location: &str, trainer: &str, class: &str, date: &str, time: &str) -> LateCancellation {
    let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
    LateCancellation {
        location: opt(location),
        teacher_name: opt(trainer),
        cleaned_class: opt(class),
        cleaned_product: Some("Monthly Unlimited".to_string()),
        date_ist: opt(date),
        time: opt(time),
        ..Default::default()
    }
}

fn sample() -> Vec<LateCancellation> {
    vec![
        cancellation("Kwality House, Kemps Corner", "Anisha", "Barre 57", "2024-06-14", "09:00"),
        cancellation("Supreme HQ, Bandra", "Rohan", "PowerCycle", "2024-06-01", "18:30"),
        cancellation("Kenkere House, Bengaluru", "Anisha", "Barre 57", "2024-03-10", "23:10"),
        cancellation("kemps corner", "Mrigakshi", "Mat 57", "2023-01-05", "07:15"),
        cancellation("", "", "", "", ""),
    ]
}

#[test]
fn test_all_criteria_is_identity() {
    let records = sample();
    let result = apply_filters(&records, &FilterCriteria::default(), &LocationCatalog::default(), now());
    assert_eq!(result, records);
}

#[test]
fn test_location_uses_aliases() {
    let records = sample();
    let result = filter_by_location(&records, &Selection::only("kwality"), &LocationCatalog::default());
    assert_eq!(result.len(), 2);
    assert!(result
        .iter()
        .all(|r| r.location.as_deref().unwrap().to_lowercase().contains("kemps")));
}

#[test]
fn test_unknown_location_passes_through() {
    let records = sample();
    let result = filter_by_location(&records, &Selection::only("goa"), &LocationCatalog::default());
    assert_eq!(result.len(), records.len());
}

#[test]
fn test_category_is_exact_and_case_sensitive() {
    let records = sample();
    let result = filter_by_category(&records, Category::Trainer, &Selection::only("Anisha"));
    assert_eq!(result.len(), 2);

    let lower = filter_by_category(&records, Category::Trainer, &Selection::only("anisha"));
    assert!(lower.is_empty());

    let class = filter_by_category(&records, Category::Class, &Selection::only("Barre 57"));
    assert_eq!(class.len(), 2);
}

#[test]
fn test_time_slot_evening_keeps_only_evening() {
    let records = vec![
        cancellation("", "", "", "", "09:00"),
        cancellation("", "", "", "", "18:30"),
        cancellation("", "", "", "", "23:10"),
    ];
    let result = filter_by_time_slot(&records, &Selection::Only(TimeSlot::Evening));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].time.as_deref(), Some("18:30"));
}

#[test]
fn test_time_slot_excludes_missing_time() {
    let records = sample();
    let late = filter_by_time_slot(&records, &Selection::Only(TimeSlot::Late));
    assert_eq!(late.len(), 1);
    assert_eq!(late[0].time.as_deref(), Some("23:10"));
}

#[test]
fn test_time_slot_excludes_date_only_sales() {
    let sale = |date: &str| SaleRecord {
        payment_date: Some(date.to_string()),
        ..Default::default()
    };
    let records = vec![sale("2024-06-10"), sale("2024-06-10 23:30:00"), sale("2024-06-11 08:00:00")];

    let late = filter_by_time_slot(&records, &Selection::Only(TimeSlot::Late));
    assert_eq!(late, vec![sale("2024-06-10 23:30:00")]);
}

#[test]
fn test_relative_timeframe_window() {
    let records = sample();
    let one_month = filter_by_timeframe(&records, Timeframe::OneMonth, &DateRange::default(), now());
    assert_eq!(one_month.len(), 2);

    let six_months = filter_by_timeframe(&records, Timeframe::SixMonths, &DateRange::default(), now());
    assert_eq!(six_months.len(), 3);

    let one_week = filter_by_timeframe(&records, Timeframe::OneWeek, &DateRange::default(), now());
    assert_eq!(one_week.len(), 1);
}

#[test]
fn test_relative_timeframe_excludes_future_dates() {
    let records = vec![cancellation("", "", "", "2024-06-20", "")];
    let result = filter_by_timeframe(&records, Timeframe::OneMonth, &DateRange::default(), now());
    assert!(result.is_empty());
}

#[test]
fn test_empty_collection_one_month() {
    let records: Vec<LateCancellation> = vec![];
    let criteria = FilterCriteria {
        timeframe: Timeframe::OneMonth,
        ..Default::default()
    };
    assert!(apply_filters(&records, &criteria, &LocationCatalog::default(), now()).is_empty());
}

#[test]
fn test_custom_unbounded_keeps_every_dated_record() {
    let mut records = sample();
    records.push(cancellation("", "", "", "2011-02-01", ""));
    records.push(cancellation("", "", "", "garbage", ""));
    let result = filter_by_timeframe(&records, Timeframe::Custom, &DateRange::default(), now());
    // 4 dated samples plus the 2011 record; the blank and garbage dates go.
    assert_eq!(result.len(), 5);
}

#[test]
fn test_custom_start_only_ends_now() {
    let records = sample();
    let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 3, 1), None);
    let result = filter_by_timeframe(&records, Timeframe::Custom, &range, now());
    assert_eq!(result.len(), 3);
}

#[test]
fn test_custom_end_only_uses_floor() {
    let records = vec![
        cancellation("", "", "", "2019-12-31", ""),
        cancellation("", "", "", "2020-01-01", ""),
        cancellation("", "", "", "2023-01-05", ""),
    ];
    let range = DateRange::new(None, NaiveDate::from_ymd_opt(2023, 1, 5));
    let result = filter_by_timeframe(&records, Timeframe::Custom, &range, now());
    assert_eq!(result.len(), 2);
}

#[test]
fn test_custom_end_date_is_inclusive() {
    let records = vec![cancellation("", "", "", "2024-03-10 21:45:00", "")];
    let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 3, 10), NaiveDate::from_ymd_opt(2024, 3, 10));
    let result = filter_by_timeframe(&records, Timeframe::Custom, &range, now());
    assert_eq!(result.len(), 1);
}

#[test]
fn test_custom_runs_after_earlier_stages() {
    let records = sample();
    let criteria = FilterCriteria {
        location: Selection::only("kwality"),
        timeframe: Timeframe::Custom,
        ..Default::default()
    };
    let result = apply_filters(&records, &criteria, &LocationCatalog::default(), now());
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|r| r.location.is_some()));
}

#[test]
fn test_combined_criteria_are_conjunctive() {
    let records = sample();
    let criteria = FilterCriteria {
        trainer: Selection::only("Anisha"),
        time_slot: Selection::Only(TimeSlot::Morning),
        ..Default::default()
    };
    let result = apply_filters(&records, &criteria, &LocationCatalog::default(), now());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].time.as_deref(), Some("09:00"));
}

#[test]
fn test_pipeline_struct_matches_free_function() {
    let records = sample();
    let criteria = FilterCriteria {
        location: Selection::only("supreme"),
        ..Default::default()
    };
    let catalog = LocationCatalog::default();
    let pipeline = FilterPipeline::new(&criteria, &catalog, now());
    assert_eq!(pipeline.apply(&records), apply_filters(&records, &criteria, &catalog, now()));
    assert_eq!(pipeline.apply_location(&records).len(), 1);
}
