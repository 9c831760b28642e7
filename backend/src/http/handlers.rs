//! HTTP handlers for the REST API.
//!
//! Each handler parses the filter query, runs the pipeline for the request
//! and delegates to the service layer for the aggregates. Handlers are
//! stateless: nothing computed for one request is kept for the next.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{CriteriaQuery, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    ClientConversionData, FilterCriteria, LateCancellationsData, LocationInfo, MemberCancellations,
    MemberId, Page, PageInfo, SalesData,
};
use crate::services::{client_conversion, late_cancellations, sales};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn criteria_from(query: CriteriaQuery) -> Result<FilterCriteria, AppError> {
    FilterCriteria::try_from(query).map_err(AppError::BadRequest)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the record
/// source is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let source_status = match state.source.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        source: source_status,
    }))
}

// =============================================================================
// Analytics Endpoints
// =============================================================================

/// GET /v1/late-cancellations
pub async fn get_late_cancellations(
    State(state): State<AppState>,
    Query(query): Query<CriteriaQuery>,
) -> HandlerResult<LateCancellationsData> {
    let criteria = criteria_from(query)?;
    let data = late_cancellations::get_late_cancellations_data(
        state.source.as_ref(),
        &criteria,
        &state.context,
        (state.clock)(),
    )
    .await;
    Ok(Json(data))
}

/// GET /v1/late-cancellations/members/{member_id}
///
/// Every late cancellation of one member that passes the filters.
pub async fn get_member_cancellations(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Query(query): Query<CriteriaQuery>,
) -> HandlerResult<MemberCancellations> {
    let criteria = criteria_from(query)?;
    let member_id = MemberId::new(member_id);
    if member_id.is_empty() {
        return Err(AppError::BadRequest("Member id must not be empty".to_string()));
    }

    late_cancellations::get_member_cancellations(
        state.source.as_ref(),
        &member_id,
        &criteria,
        &state.context,
        (state.clock)(),
    )
    .await
    .map(Json)
    .ok_or_else(|| {
        AppError::NotFound(format!("No late cancellations for member {}", member_id))
    })
}

/// GET /v1/sales
pub async fn get_sales(
    State(state): State<AppState>,
    Query(query): Query<CriteriaQuery>,
) -> HandlerResult<SalesData> {
    let criteria = criteria_from(query)?;
    let data = sales::get_sales_data(
        state.source.as_ref(),
        &criteria,
        &state.context,
        (state.clock)(),
    )
    .await;
    Ok(Json(data))
}

/// GET /v1/client-conversion
pub async fn get_client_conversion(
    State(state): State<AppState>,
    Query(query): Query<CriteriaQuery>,
) -> HandlerResult<ClientConversionData> {
    let criteria = criteria_from(query)?;
    let data = client_conversion::get_client_conversion_data(
        state.source.as_ref(),
        &criteria,
        &state.context,
        (state.clock)(),
    )
    .await;
    Ok(Json(data))
}

// =============================================================================
// Navigation
// =============================================================================

/// GET /v1/locations
///
/// The configured location tabs, in display order.
pub async fn list_locations(State(state): State<AppState>) -> HandlerResult<Vec<LocationInfo>> {
    Ok(Json(
        state
            .context
            .catalog
            .buckets()
            .iter()
            .map(LocationInfo::from)
            .collect(),
    ))
}

/// GET /v1/pages
pub async fn list_pages() -> HandlerResult<Vec<PageInfo>> {
    Ok(Json(Page::ALL.into_iter().map(PageInfo::from).collect()))
}
