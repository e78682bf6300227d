//! Analytics endpoints: read-only rollups over the catalog, the directory
//! and the assignment ledger.

use axum::{extract::Query, extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppResult;

/// Reporting window for time-based rollups
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    Month,
    Quarter,
    #[default]
    Year,
    All,
}

impl TimeFrame {
    /// Window length in days (`all` is capped at ten years)
    pub fn days(&self) -> i64 {
        match self {
            TimeFrame::Month => 30,
            TimeFrame::Quarter => 90,
            TimeFrame::Year => 365,
            TimeFrame::All => 3650,
        }
    }
}

/// Per-category asset count and value
#[derive(Serialize, ToSchema)]
pub struct CategoryStat {
    pub category_id: String,
    pub category_name: String,
    pub count: i64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
}

/// Per-status asset count and value
#[derive(Serialize, ToSchema)]
pub struct StatusStat {
    pub status: String,
    pub count: i64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
}

/// One month bucket of acquisitions
#[derive(Serialize, ToSchema)]
pub struct MonthStat {
    /// Month label, e.g. "2026-03"
    pub month: String,
    pub count: i64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
}

/// Acquisition months within the window, paginated by bucket
#[derive(Serialize, ToSchema)]
pub struct AcquisitionStats {
    pub months: Vec<MonthStat>,
    pub total_months: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// One fixed age range of the asset fleet
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct AgeBucket {
    /// Range label, e.g. "1-2 years"
    pub range: String,
    pub count: i64,
    /// Share of the fleet, rounded to one decimal; 0 when the fleet is empty
    pub percentage: f64,
}

/// Asset rollups response
#[derive(Serialize, ToSchema)]
pub struct AssetStatsResponse {
    pub time_frame: TimeFrame,
    pub total_assets: i64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
    pub categories: Vec<CategoryStat>,
    pub statuses: Vec<StatusStat>,
    pub acquisitions: AcquisitionStats,
    pub age_distribution: Vec<AgeBucket>,
}

/// Value of assets currently held by one department
#[derive(Serialize, ToSchema)]
pub struct DepartmentStat {
    pub department: String,
    pub asset_count: i64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
}

/// Department rollups response
#[derive(Serialize, ToSchema)]
pub struct DepartmentStatsResponse {
    pub time_frame: TimeFrame,
    pub departments: Vec<DepartmentStat>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// One month bucket of maintenance activity
#[derive(Serialize, ToSchema)]
pub struct MaintenanceMonthStat {
    pub month: String,
    pub count: i64,
    #[schema(value_type = f64)]
    pub total_cost: Decimal,
}

/// Maintenance rollups response
#[derive(Serialize, ToSchema)]
pub struct MaintenanceStatsResponse {
    pub time_frame: TimeFrame,
    pub total_records: i64,
    #[schema(value_type = f64)]
    pub total_cost: Decimal,
    pub months: Vec<MaintenanceMonthStat>,
    pub total_months: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Assets currently held by one employee
#[derive(Serialize, ToSchema)]
pub struct EmployeeStat {
    pub employee_id: String,
    pub name: String,
    pub department: Option<String>,
    pub assigned_count: i64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
}

/// Employee rollups response
#[derive(Serialize, ToSchema)]
pub struct EmployeeStatsResponse {
    pub employees: Vec<EmployeeStat>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Sorting options for employee rollups
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeSortBy {
    #[default]
    Name,
    Department,
    Count,
    Value,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query parameters for time-windowed rollups
#[derive(Debug, Deserialize, IntoParams)]
pub struct TimeFrameQuery {
    /// Reporting window (month, quarter, year, all); defaults to year
    pub time_frame: Option<TimeFrame>,
    /// 1-indexed page
    pub page: Option<i64>,
    /// Page size, clamped server-side
    pub limit: Option<i64>,
}

/// Query parameters for employee rollups
#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeStatsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Field to sort by (name, department, count, value)
    pub sort_by: Option<EmployeeSortBy>,
    /// Sort direction (asc, desc)
    pub sort_order: Option<SortOrder>,
}

/// Get asset rollups (by category, status, acquisition month and age)
#[utoipa::path(
    get,
    path = "/analytics/assets",
    tag = "analytics",
    params(TimeFrameQuery),
    responses(
        (status = 200, description = "Asset rollups", body = AssetStatsResponse)
    )
)]
pub async fn get_asset_stats(
    State(state): State<crate::AppState>,
    Query(query): Query<TimeFrameQuery>,
) -> AppResult<Json<AssetStatsResponse>> {
    let stats = state
        .services
        .analytics
        .asset_stats(query.time_frame.unwrap_or_default(), query.page, query.limit)
        .await?;
    Ok(Json(stats))
}

/// Get department rollups (value of assets currently held per department)
#[utoipa::path(
    get,
    path = "/analytics/departments",
    tag = "analytics",
    params(TimeFrameQuery),
    responses(
        (status = 200, description = "Department rollups", body = DepartmentStatsResponse)
    )
)]
pub async fn get_department_stats(
    State(state): State<crate::AppState>,
    Query(query): Query<TimeFrameQuery>,
) -> AppResult<Json<DepartmentStatsResponse>> {
    let stats = state
        .services
        .analytics
        .department_stats(query.time_frame.unwrap_or_default(), query.page, query.limit)
        .await?;
    Ok(Json(stats))
}

/// Get maintenance rollups (count and cost per month)
#[utoipa::path(
    get,
    path = "/analytics/maintenance",
    tag = "analytics",
    params(TimeFrameQuery),
    responses(
        (status = 200, description = "Maintenance rollups", body = MaintenanceStatsResponse)
    )
)]
pub async fn get_maintenance_stats(
    State(state): State<crate::AppState>,
    Query(query): Query<TimeFrameQuery>,
) -> AppResult<Json<MaintenanceStatsResponse>> {
    let stats = state
        .services
        .analytics
        .maintenance_stats(query.time_frame.unwrap_or_default(), query.page, query.limit)
        .await?;
    Ok(Json(stats))
}

/// Get employee rollups (count and value of currently assigned assets)
#[utoipa::path(
    get,
    path = "/analytics/employees",
    tag = "analytics",
    params(EmployeeStatsQuery),
    responses(
        (status = 200, description = "Employee rollups", body = EmployeeStatsResponse)
    )
)]
pub async fn get_employee_stats(
    State(state): State<crate::AppState>,
    Query(query): Query<EmployeeStatsQuery>,
) -> AppResult<Json<EmployeeStatsResponse>> {
    let stats = state
        .services
        .analytics
        .employee_stats(
            query.sort_by.unwrap_or_default(),
            query.sort_order.unwrap_or_default(),
            query.page,
            query.limit,
        )
        .await?;
    Ok(Json(stats))
}
