//! Visual metadata for metric cards.
//!
//! Aggregators emit plain [`Metric`] values; titles, icons and colours are
//! looked up here by [`MetricKey`].

use serde::Serialize;

use super::format::format_metric_value;
use crate::models::{Metric, MetricKey};

/// How a metric card is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardStyle {
    pub title: &'static str,
    pub description: &'static str,
    /// Icon identifier understood by the front end.
    pub icon: &'static str,
    /// Gradient identifier understood by the front end.
    pub gradient: &'static str,
}

const fn style(
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    gradient: &'static str,
) -> CardStyle {
    CardStyle {
        title,
        description,
        icon,
        gradient,
    }
}

pub fn card_style(key: MetricKey) -> CardStyle {
    match key {
        MetricKey::NewMembers => style("New Members", "Recently acquired clients", "user-plus", "from-blue-500 to-indigo-600"),
        MetricKey::ConvertedMembers => style("Converted Members", "Trial to paid conversions", "award", "from-green-500 to-teal-600"),
        MetricKey::RetainedMembers => style("Retained Members", "Active retained clients", "user-check", "from-purple-500 to-violet-600"),
        MetricKey::TrialsCompleted => style("Trials Completed", "Clients with visits after their trial", "users", "from-sky-500 to-blue-600"),
        MetricKey::LeadToTrialRate => style("Lead → Trial", "Lead to trial rate", "percent", "from-amber-500 to-orange-600"),
        MetricKey::TrialToMemberRate => style("Trial → Member", "Trial conversion rate", "arrow-right", "from-indigo-500 to-purple-600"),
        MetricKey::ConversionRate => style("Conversion Rate", "New to converted rate", "trending-up", "from-orange-500 to-red-600"),
        MetricKey::RetentionRate => style("Retention Rate", "Member retention rate", "target", "from-cyan-500 to-blue-600"),
        MetricKey::TotalLtv => style("Total LTV", "Lifetime value of all clients", "dollar-sign", "from-rose-500 to-pink-600"),
        MetricKey::AverageLtv => style("Avg LTV", "Average lifetime value", "dollar-sign", "from-pink-500 to-rose-600"),
        MetricKey::AverageConversionDays => style("Avg Conv. Time", "Average conversion time", "clock", "from-emerald-500 to-green-600"),
        MetricKey::TotalCancellations => style("Late Cancellations", "Cancellations inside the penalty window", "x-circle", "from-red-500 to-rose-600"),
        MetricKey::AffectedMembers => style("Members", "Members with a late cancellation", "users", "from-orange-500 to-amber-600"),
        MetricKey::CancellationLocations => style("Locations", "Studios with late cancellations", "map-pin", "from-blue-500 to-cyan-600"),
        MetricKey::CancelledClasses => style("Classes", "Distinct classes cancelled", "calendar", "from-purple-500 to-indigo-600"),
        MetricKey::CancellationTrainers => style("Trainers", "Trainers with cancelled classes", "graduation-cap", "from-teal-500 to-emerald-600"),
        MetricKey::PenaltyCharges => style("Penalty Charges", "Total late cancellation charges", "alert-triangle", "from-red-600 to-orange-600"),
        MetricKey::NetRevenue => style("Net Revenue", "Total payment value", "dollar-sign", "from-emerald-500 to-green-600"),
        MetricKey::Transactions => style("Transactions", "Number of payments", "shopping-cart", "from-blue-500 to-indigo-600"),
        MetricKey::UniqueMembers => style("Unique Members", "Distinct paying members", "users", "from-purple-500 to-violet-600"),
        MetricKey::AverageTransactionValue => style("Avg Transaction", "Revenue per transaction", "credit-card", "from-orange-500 to-amber-600"),
        MetricKey::AverageSpendPerMember => style("Avg Spend / Member", "Revenue per paying member", "wallet", "from-cyan-500 to-sky-600"),
        MetricKey::VatCollected => style("VAT", "VAT collected on payments", "receipt", "from-slate-500 to-gray-600"),
        MetricKey::DiscountTotal => style("Discounts", "Total discount amount", "percent", "from-pink-500 to-rose-600"),
    }
}

/// A metric joined with its style and display string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    #[serde(flatten)]
    pub style: CardStyle,
    pub display_value: String,
    pub metric: Metric,
}

impl From<&Metric> for MetricCard {
    fn from(metric: &Metric) -> Self {
        Self {
            style: card_style(metric.key),
            display_value: format_metric_value(metric.value, metric.unit),
            metric: metric.clone(),
        }
    }
}

pub fn metric_cards(metrics: &[Metric]) -> Vec<MetricCard> {
    metrics.iter().map(MetricCard::from).collect()
}
