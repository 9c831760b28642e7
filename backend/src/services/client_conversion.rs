use chrono::NaiveDateTime;
use log::debug;

use super::metrics::{conditional_mean_by, mean_by, percentage, sum_by};
use super::AnalyticsContext;
use crate::api::{ClientConversionData, ClientConversionMetrics};
use crate::models::{ClientRecord, Metric, MetricKey, MetricUnit};
use crate::source::{load_snapshot, RecordSource};
use crate::transformations::{apply_filters, FilterCriteria};

fn is_new(client: &ClientRecord) -> bool {
    client.is_new.as_deref().is_some_and(|v| v.contains("New"))
}

fn is_converted(client: &ClientRecord) -> bool {
    client.conversion_status.as_deref() == Some("Converted")
}

fn is_retained(client: &ClientRecord) -> bool {
    client.retention_status.as_deref() == Some("Retained")
}

fn completed_trial(client: &ClientRecord) -> bool {
    client.visits_post_trial.unwrap_or(0.0) > 0.0
}

/// Reduce filtered client records to funnel metrics.
pub fn compute_client_conversion(clients: &[ClientRecord]) -> ClientConversionMetrics {
    let new_members = clients.iter().filter(|c| is_new(c)).count();
    let converted_members = clients.iter().filter(|c| is_converted(c)).count();
    let retained_members = clients.iter().filter(|c| is_retained(c)).count();
    let trials_completed = clients.iter().filter(|c| completed_trial(c)).count();

    ClientConversionMetrics {
        new_members,
        converted_members,
        retained_members,
        trials_completed,
        lead_to_trial_rate: percentage(trials_completed, new_members),
        trial_to_member_rate: percentage(converted_members, trials_completed),
        conversion_rate: percentage(converted_members, new_members),
        retention_rate: percentage(retained_members, converted_members),
        total_ltv: sum_by(clients, |c| c.ltv),
        average_ltv: mean_by(clients, |c| c.ltv),
        average_conversion_days: conditional_mean_by(
            clients,
            |c| is_converted(c) && c.conversion_span.unwrap_or(0.0) > 0.0,
            |c| c.conversion_span,
        ),
    }
}

/// Metric cards in dashboard order.
pub fn client_conversion_cards(metrics: &ClientConversionMetrics) -> Vec<Metric> {
    vec![
        Metric::count(MetricKey::NewMembers, metrics.new_members),
        Metric::count(MetricKey::ConvertedMembers, metrics.converted_members),
        Metric::count(MetricKey::RetainedMembers, metrics.retained_members),
        Metric::count(MetricKey::TrialsCompleted, metrics.trials_completed),
        Metric::new(MetricKey::LeadToTrialRate, metrics.lead_to_trial_rate, MetricUnit::Percent),
        Metric::new(MetricKey::TrialToMemberRate, metrics.trial_to_member_rate, MetricUnit::Percent),
        Metric::new(MetricKey::ConversionRate, metrics.conversion_rate, MetricUnit::Percent),
        Metric::new(MetricKey::RetentionRate, metrics.retention_rate, MetricUnit::Percent),
        Metric::new(MetricKey::TotalLtv, metrics.total_ltv, MetricUnit::Currency),
        Metric::new(MetricKey::AverageLtv, metrics.average_ltv, MetricUnit::Currency),
        Metric::new(
            MetricKey::AverageConversionDays,
            metrics.average_conversion_days,
            MetricUnit::Days,
        ),
    ]
}

/// Filter and aggregate the client collection of a record source.
pub async fn get_client_conversion_data(
    source: &dyn RecordSource,
    criteria: &FilterCriteria,
    context: &AnalyticsContext,
    now: NaiveDateTime,
) -> ClientConversionData {
    let snapshot = load_snapshot("clients", source.clients()).await;
    let all = snapshot.records();
    let filtered = apply_filters(all, criteria, &context.catalog, now);
    debug!(
        "Client conversion: {} of {} clients selected",
        filtered.len(),
        all.len()
    );

    let metrics = compute_client_conversion(&filtered);
    ClientConversionData {
        criteria: criteria.clone(),
        total_count: all.len(),
        filtered_count: filtered.len(),
        cards: client_conversion_cards(&metrics),
        metrics,
    }
}

#[cfg(test)]
#[path = "client_conversion_tests.rs"]
mod client_conversion_tests;
