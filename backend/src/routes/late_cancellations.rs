use serde::{Deserialize, Serialize};

use crate::api::{FilterCriteria, FilterOptions, LateCancellation, MemberId, Metric};

// =========================================================
// Late cancellation types
// =========================================================

/// Headline figures for the late cancellation page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancellationSummary {
    pub total_cancellations: usize,
    /// Distinct non-empty member ids.
    pub affected_members: usize,
    pub locations: usize,
    pub classes: usize,
    pub trainers: usize,
    pub total_penalty: f64,
}

/// Every late cancellation of one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberCancellations {
    pub member_id: MemberId,
    pub member_name: Option<String>,
    pub email: Option<String>,
    pub count: usize,
    pub locations: Vec<String>,
    pub classes: Vec<String>,
    pub trainers: Vec<String>,
    pub total_penalty: f64,
    pub cancellations: Vec<LateCancellation>,
}

/// Number of records sharing one field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Per-value counts, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationRankings {
    pub by_class: Vec<ValueCount>,
    pub by_trainer: Vec<ValueCount>,
    pub by_location: Vec<ValueCount>,
}

/// Complete late cancellation dataset for one set of criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateCancellationsData {
    pub criteria: FilterCriteria,
    pub total_count: usize,
    pub summary: CancellationSummary,
    pub cards: Vec<Metric>,
    pub members: Vec<MemberCancellations>,
    pub rankings: CancellationRankings,
    pub options: FilterOptions,
    pub records: Vec<LateCancellation>,
}

/// Route function name constant for late cancellations
pub const GET_LATE_CANCELLATIONS_DATA: &str = "get_late_cancellations_data";
/// Route function name constant for a single member's cancellations
pub const GET_MEMBER_CANCELLATIONS: &str = "get_member_cancellations";
