//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    analytics, assets, assignments, categories, documents, employees, health, maintenance,
    requests,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventra API",
        version = "1.0.0",
        description = "Asset Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Inventra Team", email = "contact@inventra.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::get_employee_assets,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Assignments
        assignments::assign,
        assignments::unassign,
        assignments::list_assignments,
        assignments::asset_history,
        // Maintenance
        maintenance::request_maintenance,
        maintenance::update_maintenance,
        maintenance::asset_maintenance_history,
        // Analytics
        analytics::get_asset_stats,
        analytics::get_department_stats,
        analytics::get_maintenance_stats,
        analytics::get_employee_stats,
        // Requests
        requests::create_request,
        requests::list_requests,
        requests::get_request,
        requests::decide_request,
        // Documents
        documents::list_asset_documents,
        documents::create_document,
        documents::get_document,
        documents::delete_document,
    ),
    components(
        schemas(
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::AssetDetails,
            crate::models::asset::AssetStatus,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            assets::AssetListResponse,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Employees
            crate::models::employee::Employee,
            crate::models::employee::EmployeeDetails,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            employees::EmployeeListResponse,
            // Assignments
            crate::models::assignment::Assignment,
            crate::models::assignment::AssignmentDetails,
            crate::models::assignment::AssignmentStatus,
            crate::models::assignment::DurationUnit,
            assignments::AssignRequest,
            assignments::UnassignRequest,
            assignments::AssignResponse,
            assignments::UnassignResponse,
            // Maintenance
            crate::models::maintenance::MaintenanceRecord,
            crate::models::maintenance::MaintenanceStatus,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::CompleteMaintenance,
            // Analytics
            analytics::TimeFrame,
            analytics::AssetStatsResponse,
            analytics::CategoryStat,
            analytics::StatusStat,
            analytics::MonthStat,
            analytics::AcquisitionStats,
            analytics::AgeBucket,
            analytics::DepartmentStat,
            analytics::DepartmentStatsResponse,
            analytics::MaintenanceMonthStat,
            analytics::MaintenanceStatsResponse,
            analytics::EmployeeStat,
            analytics::EmployeeStatsResponse,
            analytics::EmployeeSortBy,
            analytics::SortOrder,
            // Requests
            crate::models::request::Request,
            crate::models::request::RequestDetails,
            crate::models::request::RequestStatus,
            crate::models::request::RequestType,
            crate::models::request::ApprovalDecision,
            crate::models::request::RequestResponse,
            crate::models::request::CreateRequest,
            requests::DecisionRequest,
            requests::RequestListResponse,
            // Documents
            crate::models::document::Document,
            crate::models::document::CreateDocument,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "assets", description = "Asset catalog management"),
        (name = "categories", description = "Category management"),
        (name = "employees", description = "Employee directory"),
        (name = "assignments", description = "Assignment lifecycle"),
        (name = "maintenance", description = "Maintenance tracking"),
        (name = "analytics", description = "Analytics rollups"),
        (name = "requests", description = "Approval workflow"),
        (name = "documents", description = "Asset documents")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
