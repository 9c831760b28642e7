use serde::{Deserialize, Serialize};

use crate::api::{FilterCriteria, Metric};

// =========================================================
// Client conversion types
// =========================================================

/// Funnel metrics for new clients.
///
/// Rates are percentages kept at full precision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConversionMetrics {
    pub new_members: usize,
    pub converted_members: usize,
    pub retained_members: usize,
    pub trials_completed: usize,
    pub lead_to_trial_rate: f64,
    pub trial_to_member_rate: f64,
    pub conversion_rate: f64,
    pub retention_rate: f64,
    pub total_ltv: f64,
    pub average_ltv: f64,
    /// Mean conversion span (days) over converted clients with a positive span.
    pub average_conversion_days: f64,
}

/// Complete client conversion dataset for one set of criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConversionData {
    pub criteria: FilterCriteria,
    pub total_count: usize,
    pub filtered_count: usize,
    pub metrics: ClientConversionMetrics,
    pub cards: Vec<Metric>,
}

/// Route function name constant for client conversion
pub const GET_CLIENT_CONVERSION_DATA: &str = "get_client_conversion_data";
