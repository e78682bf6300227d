//! Employee directory model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::asset::Asset;

/// Employee record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee view with the assets currently assigned to them.
///
/// `current_assets` is the set of assets with an open ledger entry for this
/// employee, computed by a join; `has_assigned_assets` and
/// `current_assignments_count` follow from it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeDetails {
    #[serde(flatten)]
    pub employee: Employee,
    pub current_assets: Vec<Asset>,
    pub current_assignments_count: i64,
    pub has_assigned_assets: bool,
}

/// Create employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
}

/// Update employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}
