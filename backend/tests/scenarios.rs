//! End-to-end scenarios over the pipeline and the aggregators.

mod support;

use insight_hub::models::{find_metric, ClientRecord, LateCancellation, MetricKey};
use insight_hub::services::client_conversion::compute_client_conversion;
use insight_hub::services::late_cancellations::summarize_cancellations;
use insight_hub::services::{Aggregate, AggregationInput, AnalyticsContext};
use insight_hub::transformations::{
    apply_filters, DateRange, FilterCriteria, Selection, TimeSlot, Timeframe,
};
use chrono::NaiveDate;
use support::{cancellation, cancellations, client, now};

fn run(records: &[LateCancellation], criteria: &FilterCriteria) -> Vec<LateCancellation> {
    apply_filters(records, criteria, &AnalyticsContext::default().catalog, now())
}

#[test]
fn average_conversion_time_skips_unconverted_clients() {
    let clients = vec![
        client("Converted", Some(10.0), "Kwality House"),
        client("Converted", Some(20.0), "Kwality House"),
        client("Trial", None, "Kwality House"),
    ];
    let metrics = compute_client_conversion(&clients);
    assert_eq!(metrics.average_conversion_days, 15.0);
    assert_eq!(metrics.converted_members, 2);
}

#[test]
fn empty_collection_with_timeframe_gives_zero_metrics() {
    let context = AnalyticsContext::default();
    let criteria = FilterCriteria {
        timeframe: Timeframe::OneMonth,
        ..Default::default()
    };
    let all: Vec<ClientRecord> = Vec::new();
    let filtered = apply_filters(&all, &criteria, &context.catalog, now());
    assert!(filtered.is_empty());

    let metrics = ClientRecord::metrics(&AggregationInput {
        all: &all,
        filtered: &filtered,
        criteria: &criteria,
        context: &context,
        now: now(),
    });
    assert!(!metrics.is_empty());
    assert!(metrics.iter().all(|m| m.value == 0.0 && m.value.is_finite()));
}

#[test]
fn evening_slot_keeps_only_evening_classes() {
    let records = vec![
        cancellation("A", "Kwality House", "Anisha", "Barre 57", "2024-06-10", "09:00"),
        cancellation("B", "Kwality House", "Anisha", "Barre 57", "2024-06-10", "18:30"),
        cancellation("C", "Kwality House", "Anisha", "Barre 57", "2024-06-10", "23:10"),
    ];
    let criteria = FilterCriteria {
        time_slot: Selection::only(TimeSlot::Evening),
        ..Default::default()
    };
    let filtered = run(&records, &criteria);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].time.as_deref(), Some("18:30"));
}

#[test]
fn unbounded_custom_range_keeps_every_dated_record() {
    let mut records = cancellations();
    records.push(cancellation("X", "Kwality House", "Anisha", "Barre 57", "not a date", "09:00"));
    let criteria = FilterCriteria {
        timeframe: Timeframe::Custom,
        date_range: DateRange::default(),
        ..Default::default()
    };
    // 2022 and 2023 records are kept too; only the unreadable date drops out.
    assert_eq!(run(&records, &criteria).len(), cancellations().len());
}

#[test]
fn custom_range_end_includes_the_whole_day() {
    let criteria = FilterCriteria {
        timeframe: Timeframe::Custom,
        date_range: DateRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 20),
            NaiveDate::from_ymd_opt(2024, 6, 1),
        ),
        ..Default::default()
    };
    let kept = run(&cancellations(), &criteria);
    let dates: Vec<_> = kept.iter().filter_map(|r| r.date_ist.as_deref()).collect();
    assert_eq!(dates, vec!["2024-06-01", "2024-05-20"]);
}

#[test]
fn location_trainer_and_month_combine() {
    let criteria = FilterCriteria {
        location: Selection::only("kwality"),
        trainer: Selection::only("Rohan"),
        timeframe: Timeframe::OneMonth,
        ..Default::default()
    };
    let kept = run(&cancellations(), &criteria);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].cleaned_class.as_deref(), Some("PowerCycle"));

    let summary = summarize_cancellations(&kept);
    assert_eq!(summary.total_cancellations, 1);
    assert_eq!(summary.affected_members, 1);
    assert_eq!(summary.total_penalty, 500.0);
}

#[test]
fn unknown_location_passes_everything() {
    let criteria = FilterCriteria {
        location: Selection::only("goa"),
        ..Default::default()
    };
    assert_eq!(run(&cancellations(), &criteria).len(), cancellations().len());
}

#[test]
fn cancellation_cards_follow_the_filtered_collection() {
    let context = AnalyticsContext::default();
    let all = cancellations();
    let criteria = FilterCriteria {
        location: Selection::only("supreme"),
        ..Default::default()
    };
    let filtered = apply_filters(&all, &criteria, &context.catalog, now());
    let metrics = LateCancellation::metrics(&AggregationInput {
        all: &all,
        filtered: &filtered,
        criteria: &criteria,
        context: &context,
        now: now(),
    });

    let total = find_metric(&metrics, MetricKey::TotalCancellations).unwrap();
    assert_eq!(total.value, 2.0);
    let members = find_metric(&metrics, MetricKey::AffectedMembers).unwrap();
    assert_eq!(members.value, 2.0);
}
