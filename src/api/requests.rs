//! Approval request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::request::{CreateRequest, Request, RequestResponse, RequestStatus, RequestType},
};

/// One approver's decision on a request
#[derive(Deserialize, ToSchema)]
pub struct DecisionRequest {
    pub approver: String,
    /// approved or rejected
    pub status: RequestStatus,
    pub notes: Option<String>,
}

/// Query parameters for listing requests
#[derive(Debug, Deserialize, IntoParams)]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
    pub request_type: Option<RequestType>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Request list response
#[derive(Serialize, ToSchema)]
pub struct RequestListResponse {
    pub items: Vec<Request>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Create an approval request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = RequestResponse),
        (status = 400, description = "Invalid request payload"),
        (status = 404, description = "Referenced asset not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<RequestResponse>)> {
    if request.requestor.is_empty() {
        return Err(AppError::BadRequest("requestor is required".to_string()));
    }

    let created = state.services.requests.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(RequestListQuery),
    responses(
        (status = 200, description = "Requests", body = RequestListResponse)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    Query(query): Query<RequestListQuery>,
) -> AppResult<Json<RequestListResponse>> {
    let limit = super::clamp_limit(
        query.limit,
        state.config.assignments.default_page_size,
        state.config.assignments.max_page_size,
    );
    let page = super::clamp_page(query.page);

    let (items, total) = state
        .services
        .requests
        .list(query.status, query.request_type, limit, (page - 1) * limit)
        .await?;

    Ok(Json(RequestListResponse {
        items,
        total,
        page,
        limit,
        total_pages: super::total_pages(total, limit),
    }))
}

/// Get a request with its approvers
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = String, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request", body = RequestResponse),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RequestResponse>> {
    let request = state.services.requests.get(&id).await?;
    Ok(Json(request))
}

/// Record an approver's decision.
///
/// A single rejection resolves the request as rejected; approval needs every
/// approver. Reaching a terminal status fires the request type's catalog
/// effect exactly once.
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = String, Path, description = "Request ID")
    ),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Updated request", body = RequestResponse),
        (status = 400, description = "Invalid decision"),
        (status = 404, description = "Request or approver not found"),
        (status = 409, description = "Request already resolved")
    )
)]
pub async fn decide_request(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(decision): Json<DecisionRequest>,
) -> AppResult<Json<RequestResponse>> {
    if decision.approver.is_empty() {
        return Err(AppError::BadRequest("approver is required".to_string()));
    }

    let updated = state
        .services
        .requests
        .decide(&id, &decision.approver, decision.status, decision.notes.as_deref())
        .await?;
    Ok(Json(updated))
}
