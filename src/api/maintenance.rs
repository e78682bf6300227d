//! Maintenance history endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::asset::AssetDetails,
    models::maintenance::{CompleteMaintenance, CreateMaintenance, MaintenanceRecord},
};

/// Request maintenance for an asset
#[utoipa::path(
    post,
    path = "/maintenance-history/request",
    tag = "maintenance",
    request_body = CreateMaintenance,
    responses(
        (status = 200, description = "Maintenance requested, updated asset view", body = AssetDetails),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Category does not require maintenance")
    )
)]
pub async fn request_maintenance(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateMaintenance>,
) -> AppResult<Json<AssetDetails>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let asset = state.services.maintenance.request(request).await?;
    Ok(Json(asset))
}

/// Complete or update a maintenance record
#[utoipa::path(
    post,
    path = "/maintenance-history/update",
    tag = "maintenance",
    request_body = CompleteMaintenance,
    responses(
        (status = 200, description = "Maintenance completed, updated asset view", body = AssetDetails),
        (status = 404, description = "Asset or maintenance record not found")
    )
)]
pub async fn update_maintenance(
    State(state): State<crate::AppState>,
    Json(request): Json<CompleteMaintenance>,
) -> AppResult<Json<AssetDetails>> {
    if request.asset_id.is_empty() || request.maintenance_id.is_empty() {
        return Err(AppError::BadRequest(
            "asset_id and maintenance_id are required".to_string(),
        ));
    }

    let asset = state.services.maintenance.complete(request).await?;
    Ok(Json(asset))
}

/// Maintenance records for one asset
#[utoipa::path(
    get,
    path = "/assets/{id}/maintenance-history",
    tag = "maintenance",
    params(
        ("id" = String, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Maintenance records", body = Vec<MaintenanceRecord>),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn asset_maintenance_history(
    State(state): State<crate::AppState>,
    Path(asset_id): Path<String>,
) -> AppResult<Json<Vec<MaintenanceRecord>>> {
    let records = state
        .services
        .maintenance
        .history_for_asset(&asset_id)
        .await?;
    Ok(Json(records))
}
