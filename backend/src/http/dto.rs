//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies are the DTOs from [`crate::api`]; this module only adds the
//! request query and the health payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{DateRange, FilterCriteria, Selection, Timeframe};

/// Filter selectors as query parameters.
///
/// Every parameter is optional; a missing or empty value and the literal
/// `all` both leave the stage disabled.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CriteriaQuery {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub trainer: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub time_slot: Option<String>,
    /// Custom range start (`YYYY-MM-DD`)
    #[serde(default)]
    pub start: Option<String>,
    /// Custom range end (`YYYY-MM-DD`), inclusive
    #[serde(default)]
    pub end: Option<String>,
}

fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| format!("Invalid {} date '{}': {}", field, s, e)),
    }
}

fn text_selection(raw: Option<&str>) -> Selection<String> {
    // Parsing a String selection cannot fail.
    raw.and_then(|s| s.parse().ok()).unwrap_or_default()
}

impl TryFrom<CriteriaQuery> for FilterCriteria {
    type Error = String;

    fn try_from(query: CriteriaQuery) -> Result<Self, Self::Error> {
        let timeframe: Timeframe = query.timeframe.as_deref().unwrap_or_default().parse()?;
        let time_slot = query.time_slot.as_deref().unwrap_or_default().parse()?;
        let date_range = DateRange::new(
            parse_date("start", query.start.as_deref())?,
            parse_date("end", query.end.as_deref())?,
        );

        Ok(FilterCriteria {
            location: text_selection(query.location.as_deref()),
            timeframe,
            date_range,
            trainer: text_selection(query.trainer.as_deref()),
            class_name: text_selection(query.class.as_deref()),
            product: text_selection(query.product.as_deref()),
            time_slot,
        })
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Record source status
    pub source: String,
}
