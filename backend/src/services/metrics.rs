//! Shared reducers for every aggregator.
//!
//! All ratios and averages go through [`safe_ratio`], so a zero denominator
//! always yields zero and never a NaN or infinity.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{MetricComparison, TrendLevel};

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// `safe_ratio` scaled to a percentage.
pub fn percentage(part: usize, whole: usize) -> f64 {
    safe_ratio(part as f64, whole as f64) * 100.0
}

/// Sum of a numeric field, counting missing values as zero.
pub fn sum_by<T, F>(items: &[T], value: F) -> f64
where
    F: Fn(&T) -> Option<f64>,
{
    items.iter().map(|item| value(item).unwrap_or(0.0)).sum()
}

/// Mean of a numeric field over all items; zero for an empty slice.
pub fn mean_by<T, F>(items: &[T], value: F) -> f64
where
    F: Fn(&T) -> Option<f64>,
{
    safe_ratio(sum_by(items, value), items.len() as f64)
}

/// Mean of a numeric field over the items that satisfy `keep`.
///
/// Zero when no item qualifies.
pub fn conditional_mean_by<T, P, F>(items: &[T], keep: P, value: F) -> f64
where
    P: Fn(&T) -> bool,
    F: Fn(&T) -> Option<f64>,
{
    let (total, count) = items
        .iter()
        .filter(|item| keep(item))
        .fold((0.0, 0usize), |(total, count), item| {
            (total + value(item).unwrap_or(0.0), count + 1)
        });
    safe_ratio(total, count as f64)
}

/// Number of distinct non-empty keys.
pub fn distinct_count<'a, T, F>(items: &'a [T], key: F) -> usize
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    items
        .iter()
        .filter_map(key)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// Percent-change cut-offs for significance and trend strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendThresholds {
    /// Changes at or above this magnitude are flagged significant.
    #[serde(default = "default_significance_pct")]
    pub significance_pct: f64,
    /// Lower bound of a moderate trend.
    #[serde(default = "default_moderate_pct")]
    pub moderate_pct: f64,
    /// Lower bound of a strong trend.
    #[serde(default = "default_strong_pct")]
    pub strong_pct: f64,
}

fn default_significance_pct() -> f64 {
    5.0
}

fn default_moderate_pct() -> f64 {
    10.0
}

fn default_strong_pct() -> f64 {
    20.0
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            significance_pct: default_significance_pct(),
            moderate_pct: default_moderate_pct(),
            strong_pct: default_strong_pct(),
        }
    }
}

impl TrendThresholds {
    /// Classify a percent change. Monotonic in `|percent_change|`.
    pub fn classify(&self, percent_change: f64) -> TrendLevel {
        let magnitude = percent_change.abs();
        if magnitude >= self.strong_pct {
            TrendLevel::Strong
        } else if magnitude >= self.moderate_pct {
            TrendLevel::Moderate
        } else {
            TrendLevel::Weak
        }
    }

    pub fn is_significant(&self, percent_change: f64) -> bool {
        percent_change.abs() >= self.significance_pct
    }

    /// Check that the cut-offs are ordered (moderate <= strong).
    pub fn validate(&self) -> Result<(), String> {
        let values = [self.significance_pct, self.moderate_pct, self.strong_pct];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err("trend thresholds must be finite and non-negative".to_string());
        }
        if self.moderate_pct > self.strong_pct {
            return Err(format!(
                "moderate_pct ({}) must not exceed strong_pct ({})",
                self.moderate_pct, self.strong_pct
            ));
        }
        Ok(())
    }
}

/// Compare a current value against the previous period.
pub fn compare(current: f64, previous: f64, thresholds: &TrendThresholds) -> MetricComparison {
    let difference = current - previous;
    let percent_change = safe_ratio(difference, previous.abs()) * 100.0;
    MetricComparison {
        current,
        previous,
        difference,
        percent_change,
        significant: thresholds.is_significant(percent_change),
        trend: thresholds.classify(percent_change),
    }
}
