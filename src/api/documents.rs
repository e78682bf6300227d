//! Asset document endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::document::{CreateDocument, Document},
};

/// Documents attached to one asset
#[utoipa::path(
    get,
    path = "/assets/{id}/documents",
    tag = "documents",
    params(
        ("id" = String, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Documents", body = Vec<Document>)
    )
)]
pub async fn list_asset_documents(
    State(state): State<crate::AppState>,
    Path(asset_id): Path<String>,
) -> AppResult<Json<Vec<Document>>> {
    let documents = state.services.assets.list_documents(&asset_id).await?;
    Ok(Json(documents))
}

/// Attach a document to an asset
#[utoipa::path(
    post,
    path = "/documents",
    tag = "documents",
    request_body = CreateDocument,
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn create_document(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateDocument>,
) -> AppResult<(StatusCode, Json<Document>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let document = state.services.assets.create_document(request).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Get a document
#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "documents",
    params(
        ("id" = String, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document", body = Document),
        (status = 404, description = "Document not found")
    )
)]
pub async fn get_document(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Document>> {
    let document = state.services.assets.get_document(&id).await?;
    Ok(Json(document))
}

/// Delete a document
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = "documents",
    params(
        ("id" = String, Path, description = "Document ID")
    ),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn delete_document(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.assets.delete_document(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
