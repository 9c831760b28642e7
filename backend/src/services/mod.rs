//! Service layer: metric aggregation and orchestration.
//!
//! Services sit between the record source and the callers (page controllers,
//! HTTP handlers). The `compute_*` functions are pure reductions over
//! already-filtered records; the `get_*` functions load a snapshot from a
//! [`RecordSource`](crate::source::RecordSource), run the filter pipeline and
//! aggregate.

pub mod client_conversion;
pub mod late_cancellations;
pub mod metrics;
pub mod options;
pub mod sales;

use chrono::NaiveDateTime;

use crate::config::HubConfig;
use crate::models::{ClientRecord, FilterableRecord, LateCancellation, Metric, SaleRecord};
use crate::transformations::{FilterCriteria, LocationCatalog};

pub use client_conversion::{client_conversion_cards, compute_client_conversion, get_client_conversion_data};
pub use late_cancellations::{
    cancellation_cards, get_late_cancellations_data, get_member_cancellations, member_breakdown,
    rank_values, summarize_cancellations,
};
pub use metrics::{compare, safe_ratio, TrendThresholds};
pub use options::filter_options;
pub use sales::{compute_sales_metrics, get_sales_data, product_breakdown, sales_cards};

/// Settings shared by every aggregation: the location catalog used by the
/// location stage and the trend cut-offs used by comparisons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsContext {
    pub catalog: LocationCatalog,
    pub thresholds: TrendThresholds,
}

impl AnalyticsContext {
    pub fn new(catalog: LocationCatalog, thresholds: TrendThresholds) -> Self {
        Self {
            catalog,
            thresholds,
        }
    }

    pub fn from_config(config: &HubConfig) -> Self {
        Self::new(config.catalog(), config.trends)
    }
}

/// Everything an aggregation may look at for one recomputation.
#[derive(Debug, Clone, Copy)]
pub struct AggregationInput<'a, R> {
    /// The complete, unfiltered collection.
    pub all: &'a [R],
    /// Output of the filter pipeline for `criteria`.
    pub filtered: &'a [R],
    pub criteria: &'a FilterCriteria,
    pub context: &'a AnalyticsContext,
    pub now: NaiveDateTime,
}

/// A record kind that can be reduced to metric cards.
pub trait Aggregate: FilterableRecord + Clone + Sized {
    fn metrics(input: &AggregationInput<'_, Self>) -> Vec<Metric>;
}

impl Aggregate for LateCancellation {
    fn metrics(input: &AggregationInput<'_, Self>) -> Vec<Metric> {
        cancellation_cards(&summarize_cancellations(input.filtered))
    }
}

impl Aggregate for ClientRecord {
    fn metrics(input: &AggregationInput<'_, Self>) -> Vec<Metric> {
        client_conversion_cards(&compute_client_conversion(input.filtered))
    }
}

impl Aggregate for SaleRecord {
    fn metrics(input: &AggregationInput<'_, Self>) -> Vec<Metric> {
        let period = sales::sales_period(input.criteria, input.now);
        sales_cards(input.all, input.filtered, input.criteria, input.context, period)
    }
}
