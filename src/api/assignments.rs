//! Assignment lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::asset::AssetDetails,
    models::assignment::{AssignmentDetails, DurationUnit},
    services::assignments::{AssignOptions, UnassignOptions},
};

/// Assign request body
#[derive(Deserialize, ToSchema)]
pub struct AssignRequest {
    pub asset_id: String,
    pub employee_id: String,
    /// Explicit duration; takes priority over expected_return_date
    pub duration: Option<i64>,
    /// Unit for the explicit duration (days, weeks, months, years)
    pub duration_unit: Option<DurationUnit>,
    /// Explicit return date, used when no duration is given
    pub expected_return_date: Option<DateTime<Utc>>,
    /// Asset condition noted at hand-over
    pub condition: Option<String>,
    pub notes: Option<String>,
}

/// Unassign request body
#[derive(Deserialize, ToSchema)]
pub struct UnassignRequest {
    pub assignment_id: String,
    /// Return timestamp; defaults to now
    pub return_date: Option<DateTime<Utc>>,
    /// Asset condition noted at return
    pub condition_after: Option<String>,
    pub notes: Option<String>,
}

/// Assign response with the updated asset view
#[derive(Serialize, ToSchema)]
pub struct AssignResponse {
    pub status: String,
    pub assignment_id: String,
    pub asset_id: String,
    pub employee_id: String,
    pub timestamp: DateTime<Utc>,
    pub asset: AssetDetails,
}

/// Unassign response with the updated asset view
#[derive(Serialize, ToSchema)]
pub struct UnassignResponse {
    pub status: String,
    pub assignment_id: String,
    pub asset_id: String,
    pub employee_id: String,
    pub return_date: DateTime<Utc>,
    pub asset: AssetDetails,
}

/// Query parameters for listing ledger entries
#[derive(Debug, Deserialize, IntoParams)]
pub struct AssignmentListQuery {
    /// Restrict to one asset
    pub asset_id: Option<String>,
    /// Restrict to one employee
    pub employee_id: Option<String>,
    /// Only open episodes
    #[serde(default)]
    pub active: Option<bool>,
}

/// Assign an asset to an employee
#[utoipa::path(
    post,
    path = "/assignment-history/assign",
    tag = "assignments",
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Asset assigned", body = AssignResponse),
        (status = 400, description = "Missing or invalid identifiers"),
        (status = 404, description = "Asset or employee not found"),
        (status = 409, description = "Asset already assigned")
    )
)]
pub async fn assign(
    State(state): State<crate::AppState>,
    Json(request): Json<AssignRequest>,
) -> AppResult<Json<AssignResponse>> {
    if request.asset_id.is_empty() || request.employee_id.is_empty() {
        return Err(AppError::BadRequest(
            "asset_id and employee_id are required".to_string(),
        ));
    }

    let options = AssignOptions {
        duration: request.duration,
        duration_unit: request.duration_unit,
        expected_return_date: request.expected_return_date,
        condition: request.condition,
        notes: request.notes,
    };

    let (assignment, asset) = state
        .services
        .assignments
        .assign(&request.asset_id, &request.employee_id, options)
        .await?;

    Ok(Json(AssignResponse {
        status: "assigned".to_string(),
        assignment_id: assignment.id,
        asset_id: assignment.asset_id,
        employee_id: assignment.employee_id,
        timestamp: assignment.assignment_date,
        asset,
    }))
}

/// Close an assignment (return the asset)
#[utoipa::path(
    post,
    path = "/assignment-history/unassign",
    tag = "assignments",
    request_body = UnassignRequest,
    responses(
        (status = 200, description = "Asset returned", body = UnassignResponse),
        (status = 400, description = "Missing assignment id"),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "Assignment already returned")
    )
)]
pub async fn unassign(
    State(state): State<crate::AppState>,
    Json(request): Json<UnassignRequest>,
) -> AppResult<Json<UnassignResponse>> {
    if request.assignment_id.is_empty() {
        return Err(AppError::BadRequest("assignment_id is required".to_string()));
    }

    let options = UnassignOptions {
        return_date: request.return_date,
        condition_after: request.condition_after,
        notes: request.notes,
    };

    let (assignment, asset) = state
        .services
        .assignments
        .unassign(&request.assignment_id, options)
        .await?;

    // close_episode always stamps a return date
    let return_date = assignment
        .return_date
        .ok_or_else(|| AppError::Internal("Closed assignment missing return date".to_string()))?;

    Ok(Json(UnassignResponse {
        status: "returned".to_string(),
        assignment_id: assignment.id,
        asset_id: assignment.asset_id,
        employee_id: assignment.employee_id,
        return_date,
        asset,
    }))
}

/// List ledger entries
#[utoipa::path(
    get,
    path = "/assignment-history",
    tag = "assignments",
    params(AssignmentListQuery),
    responses(
        (status = 200, description = "Assignment episodes", body = Vec<AssignmentDetails>)
    )
)]
pub async fn list_assignments(
    State(state): State<crate::AppState>,
    Query(query): Query<AssignmentListQuery>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    let assignments = state
        .services
        .assignments
        .list(
            query.asset_id.as_deref(),
            query.employee_id.as_deref(),
            query.active.unwrap_or(false),
        )
        .await?;
    Ok(Json(assignments))
}

/// Assignment episodes for one asset
#[utoipa::path(
    get,
    path = "/assets/{id}/assignment-history",
    tag = "assignments",
    params(
        ("id" = String, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Episodes for the asset", body = Vec<AssignmentDetails>),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn asset_history(
    State(state): State<crate::AppState>,
    Path(asset_id): Path<String>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    let assignments = state
        .services
        .assignments
        .history_for_asset(&asset_id)
        .await?;
    Ok(Json(assignments))
}
