//! Employee directory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::asset::Asset,
    models::employee::{CreateEmployee, Employee, EmployeeDetails, UpdateEmployee},
};

/// Query parameters for listing employees
#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeListQuery {
    pub department: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Employee list response
#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub items: Vec<Employee>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// List employees
#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    params(EmployeeListQuery),
    responses(
        (status = 200, description = "Employees", body = EmployeeListResponse)
    )
)]
pub async fn list_employees(
    State(state): State<crate::AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> AppResult<Json<EmployeeListResponse>> {
    let limit = super::clamp_limit(
        query.limit,
        state.config.assignments.default_page_size,
        state.config.assignments.max_page_size,
    );
    let page = super::clamp_page(query.page);

    let (items, total) = state
        .services
        .employees
        .list(query.department.as_deref(), limit, (page - 1) * limit)
        .await?;

    Ok(Json(EmployeeListResponse {
        items,
        total,
        page,
        limit,
        total_pages: super::total_pages(total, limit),
    }))
}

/// Get an employee with their currently assigned assets
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee details", body = EmployeeDetails),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeDetails>> {
    let employee = state.services.employees.get(&id).await?;
    Ok(Json(employee))
}

/// Assets currently assigned to an employee
#[utoipa::path(
    get,
    path = "/employees/{id}/assets",
    tag = "employees",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Currently assigned assets", body = Vec<Asset>),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee_assets(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.employees.current_assets(&id).await?;
    Ok(Json(assets))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_employee(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let employee = state.services.employees.create(request).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let employee = state.services.employees.update(&id, request).await?;
    Ok(Json(employee))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee still holds assigned assets")
    )
)]
pub async fn delete_employee(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.employees.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
