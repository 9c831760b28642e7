use serde::{Deserialize, Serialize};

/// Stable identifier of a derived metric.
///
/// Presentation code maps these keys to titles, icons and gradients; the
/// aggregators never deal with visuals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    // Client conversion
    NewMembers,
    ConvertedMembers,
    RetainedMembers,
    TrialsCompleted,
    LeadToTrialRate,
    TrialToMemberRate,
    ConversionRate,
    RetentionRate,
    TotalLtv,
    AverageLtv,
    AverageConversionDays,
    // Late cancellations
    TotalCancellations,
    AffectedMembers,
    CancellationLocations,
    CancelledClasses,
    CancellationTrainers,
    PenaltyCharges,
    // Sales
    NetRevenue,
    Transactions,
    UniqueMembers,
    AverageTransactionValue,
    AverageSpendPerMember,
    VatCollected,
    DiscountTotal,
}

/// How a metric value should be read and formatted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    Count,
    Currency,
    Percent,
    Days,
}

/// Strength of a period-over-period change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLevel {
    Weak,
    Moderate,
    Strong,
}

/// Comparison of a metric against the previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub current: f64,
    pub previous: f64,
    pub difference: f64,
    /// Percent change relative to `previous`; zero when `previous` is zero.
    pub percent_change: f64,
    pub significant: bool,
    pub trend: TrendLevel,
}

/// A named derived scalar. Values keep full precision; rounding happens only
/// when formatting for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub key: MetricKey,
    pub value: f64,
    pub unit: MetricUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<MetricComparison>,
}

impl Metric {
    pub fn new(key: MetricKey, value: f64, unit: MetricUnit) -> Self {
        Self {
            key,
            value,
            unit,
            comparison: None,
        }
    }

    pub fn count(key: MetricKey, value: usize) -> Self {
        Self::new(key, value as f64, MetricUnit::Count)
    }

    pub fn with_comparison(mut self, comparison: MetricComparison) -> Self {
        self.comparison = Some(comparison);
        self
    }
}

/// Look up a metric by key in a card list.
pub fn find_metric(metrics: &[Metric], key: MetricKey) -> Option<&Metric> {
    metrics.iter().find(|m| m.key == key)
}
