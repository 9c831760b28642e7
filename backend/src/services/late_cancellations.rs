use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDateTime;
use log::debug;

use super::metrics::{distinct_count, sum_by};
use super::options::filter_options;
use super::AnalyticsContext;
use crate::api::{
    CancellationRankings, CancellationSummary, LateCancellationsData, MemberCancellations,
    ValueCount,
};
use crate::models::{FilterableRecord, LateCancellation, MemberId, Metric, MetricKey, MetricUnit};
use crate::source::{load_snapshot, RecordSource};
use crate::transformations::{FilterCriteria, FilterPipeline};

fn member_key(record: &LateCancellation) -> Option<&str> {
    record.member_id.as_ref().map(MemberId::as_str)
}

/// Headline figures over filtered cancellations.
pub fn summarize_cancellations(records: &[LateCancellation]) -> CancellationSummary {
    CancellationSummary {
        total_cancellations: records.len(),
        affected_members: distinct_count(records, member_key),
        locations: distinct_count(records, |r| r.location()),
        classes: distinct_count(records, |r| r.class_name()),
        trainers: distinct_count(records, |r| r.trainer()),
        total_penalty: sum_by(records, |r| r.charged_penalty_amount),
    }
}

pub fn cancellation_cards(summary: &CancellationSummary) -> Vec<Metric> {
    vec![
        Metric::count(MetricKey::TotalCancellations, summary.total_cancellations),
        Metric::count(MetricKey::AffectedMembers, summary.affected_members),
        Metric::count(MetricKey::CancellationLocations, summary.locations),
        Metric::count(MetricKey::CancelledClasses, summary.classes),
        Metric::count(MetricKey::CancellationTrainers, summary.trainers),
        Metric::new(MetricKey::PenaltyCharges, summary.total_penalty, MetricUnit::Currency),
    ]
}

fn sorted_distinct<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = Option<&'a str>>,
{
    values
        .flatten()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn summarize_member(member_id: MemberId, cancellations: Vec<LateCancellation>) -> MemberCancellations {
    let member_name = cancellations.iter().find_map(LateCancellation::member_name);
    let email = cancellations.iter().find_map(|c| c.email.clone());
    MemberCancellations {
        member_id,
        member_name,
        email,
        count: cancellations.len(),
        locations: sorted_distinct(cancellations.iter().map(|c| c.location())),
        classes: sorted_distinct(cancellations.iter().map(|c| c.class_name())),
        trainers: sorted_distinct(cancellations.iter().map(|c| c.trainer())),
        total_penalty: sum_by(&cancellations, |c| c.charged_penalty_amount),
        cancellations,
    }
}

/// Group cancellations per member, most cancellations first.
///
/// Records without a member id are left out. Ties are ordered by member id.
pub fn member_breakdown(records: &[LateCancellation]) -> Vec<MemberCancellations> {
    let mut groups: HashMap<&str, Vec<LateCancellation>> = HashMap::new();
    for record in records {
        if let Some(id) = member_key(record).filter(|id| !id.is_empty()) {
            groups.entry(id).or_default().push(record.clone());
        }
    }

    let mut members: Vec<MemberCancellations> = groups
        .into_iter()
        .map(|(id, cancellations)| summarize_member(MemberId::from(id), cancellations))
        .collect();
    members.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.member_id.as_str().cmp(b.member_id.as_str()))
    });
    members
}

/// Count records per value of one field, most frequent first.
pub fn rank_values<'a, F>(records: &'a [LateCancellation], field: F) -> Vec<ValueCount>
where
    F: Fn(&'a LateCancellation) -> Option<&'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in records.iter().filter_map(field) {
        let value = value.trim();
        if !value.is_empty() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    ranked
}

pub fn cancellation_rankings(records: &[LateCancellation]) -> CancellationRankings {
    CancellationRankings {
        by_class: rank_values(records, |r| r.class_name()),
        by_trainer: rank_values(records, |r| r.trainer()),
        by_location: rank_values(records, |r| r.location()),
    }
}

/// Filter and aggregate the late cancellations of a record source.
pub async fn get_late_cancellations_data(
    source: &dyn RecordSource,
    criteria: &FilterCriteria,
    context: &AnalyticsContext,
    now: NaiveDateTime,
) -> LateCancellationsData {
    let snapshot = load_snapshot("late cancellations", source.late_cancellations()).await;
    let all = snapshot.records();
    let pipeline = FilterPipeline::new(criteria, &context.catalog, now);
    let filtered = pipeline.apply(all);
    debug!(
        "Late cancellations: {} of {} records selected",
        filtered.len(),
        all.len()
    );

    let summary = summarize_cancellations(&filtered);
    LateCancellationsData {
        criteria: criteria.clone(),
        total_count: all.len(),
        cards: cancellation_cards(&summary),
        summary,
        members: member_breakdown(&filtered),
        rankings: cancellation_rankings(&filtered),
        options: filter_options(&pipeline.apply_location(all)),
        records: filtered,
    }
}

/// One member's cancellations under the given criteria, if any match.
pub async fn get_member_cancellations(
    source: &dyn RecordSource,
    member_id: &MemberId,
    criteria: &FilterCriteria,
    context: &AnalyticsContext,
    now: NaiveDateTime,
) -> Option<MemberCancellations> {
    let snapshot = load_snapshot("late cancellations", source.late_cancellations()).await;
    let filtered = FilterPipeline::new(criteria, &context.catalog, now).apply(snapshot.records());
    let cancellations: Vec<LateCancellation> = filtered
        .into_iter()
        .filter(|c| c.member_id.as_ref() == Some(member_id))
        .collect();

    if cancellations.is_empty() {
        None
    } else {
        Some(summarize_member(member_id.clone(), cancellations))
    }
}

#[cfg(test)]
#[path = "late_cancellations_tests.rs"]
mod late_cancellations_tests;
