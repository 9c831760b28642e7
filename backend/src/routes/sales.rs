use serde::{Deserialize, Serialize};

use crate::api::{FilterCriteria, Metric, PeriodPair};

// =========================================================
// Sales types
// =========================================================

/// Revenue figures for one collection of sales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesMetrics {
    pub net_revenue: f64,
    pub transactions: usize,
    /// Distinct customers, keyed by member id and falling back to email.
    pub unique_members: usize,
    pub average_transaction_value: f64,
    pub average_spend_per_member: f64,
    pub vat_collected: f64,
    pub discount_total: f64,
}

/// Revenue attributed to one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product: String,
    pub revenue: f64,
    pub transactions: usize,
    pub unique_members: usize,
}

/// Complete sales dataset for one set of criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesData {
    pub criteria: FilterCriteria,
    pub total_count: usize,
    pub filtered_count: usize,
    /// Metrics over the filtered collection.
    pub metrics: SalesMetrics,
    /// The windows the card comparisons were computed over.
    pub period: PeriodPair,
    pub cards: Vec<Metric>,
    /// Per-product drill-down, highest revenue first.
    pub products: Vec<ProductSales>,
}

/// Route function name constant for sales
pub const GET_SALES_DATA: &str = "get_sales_data";
