//! Asset document model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Document attached to an asset (invoice, warranty, manual…)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Document {
    pub id: String,
    pub asset_id: String,
    pub title: String,
    pub document_type: Option<String>,
    pub file_url: Option<String>,
    pub uploaded_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create document request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDocument {
    pub asset_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub document_type: Option<String>,
    #[validate(url)]
    pub file_url: Option<String>,
    pub uploaded_by: Option<String>,
    pub notes: Option<String>,
}
