//! Asset catalog endpoints

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
    models::asset::{Asset, AssetDetails, AssetStatus, CreateAsset, UpdateAsset},
    repository::assets::AssetFilter,
};

/// Query parameters for listing assets
#[derive(Debug, Deserialize, IntoParams)]
pub struct AssetListQuery {
    pub status: Option<AssetStatus>,
    pub category_id: Option<String>,
    pub department: Option<String>,
    /// Substring match on the asset name
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Asset list response
#[derive(Serialize, ToSchema)]
pub struct AssetListResponse {
    pub items: Vec<Asset>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// List assets
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    params(AssetListQuery),
    responses(
        (status = 200, description = "Assets", body = AssetListResponse)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    Query(query): Query<AssetListQuery>,
) -> AppResult<Json<AssetListResponse>> {
    let limit = super::clamp_limit(
        query.limit,
        state.config.assignments.default_page_size,
        state.config.assignments.max_page_size,
    );
    let page = super::clamp_page(query.page);

    let filter = AssetFilter {
        status: query.status,
        category_id: query.category_id,
        department: query.department,
        search: query.search,
    };

    let (items, total) = state
        .services
        .assets
        .list(&filter, limit, (page - 1) * limit)
        .await?;

    Ok(Json(AssetListResponse {
        items,
        total,
        page,
        limit,
        total_pages: super::total_pages(total, limit),
    }))
}

/// Get an asset with its derived assignment state and histories
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    params(
        ("id" = String, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Asset details", body = AssetDetails),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AssetDetails>> {
    let asset = state.services.assets.get(&id).await?;
    Ok(Json(asset))
}

/// Create an asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Serial number already in use")
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let asset = state.services.assets.create(request).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Update an asset
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    params(
        ("id" = String, Path, description = "Asset ID")
    ),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn update_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let asset = state.services.assets.update(&id, request).await?;
    Ok(Json(asset))
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    params(
        ("id" = String, Path, description = "Asset ID")
    ),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found"),
        (status = 409, description = "Asset has an active assignment or history")
    )
)]
pub async fn delete_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.assets.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
