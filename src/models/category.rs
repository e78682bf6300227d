//! Asset category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Asset category with its assignment and maintenance policies
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Whether one asset of this category may be assigned to several
    /// employees at the same time
    pub allow_multiple_assignments: bool,
    /// Whether assets of this category take part in the maintenance cycle
    pub requires_maintenance: bool,
    /// Maintenance interval policy string, e.g. "6 months"
    pub maintenance_frequency: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub allow_multiple_assignments: bool,
    #[serde(default)]
    pub requires_maintenance: bool,
    pub maintenance_frequency: Option<String>,
}

/// Update category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub allow_multiple_assignments: Option<bool>,
    pub requires_maintenance: Option<bool>,
    pub maintenance_frequency: Option<String>,
}
