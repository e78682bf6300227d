//! Asset (catalog entry) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::assignment::Assignment;
use super::document::Document;
use super::maintenance::MaintenanceRecord;

/// Operational status of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "asset_status", rename_all = "snake_case")]
pub enum AssetStatus {
    Available,
    Assigned,
    UnderMaintenance,
    MaintenanceRequested,
    Retired,
    Lost,
    Pending,
    Damaged,
    NonServiceable,
}

impl AssetStatus {
    /// Snake_case code as stored in the database and exposed over the API
    pub fn as_code(&self) -> &'static str {
        match self {
            AssetStatus::Available => "available",
            AssetStatus::Assigned => "assigned",
            AssetStatus::UnderMaintenance => "under_maintenance",
            AssetStatus::MaintenanceRequested => "maintenance_requested",
            AssetStatus::Retired => "retired",
            AssetStatus::Lost => "lost",
            AssetStatus::Pending => "pending",
            AssetStatus::Damaged => "damaged",
            AssetStatus::NonServiceable => "non_serviceable",
        }
    }
}

/// Asset record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub status: AssetStatus,
    pub condition: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = f64)]
    pub purchase_cost: Option<Decimal>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub is_operational: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Asset view with its derived assignment state.
///
/// The assignment fields are computed from the ledger at read time, never
/// stored, so they cannot drift from the episode history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssetDetails {
    #[serde(flatten)]
    pub asset: Asset,
    pub category_name: String,
    /// True iff at least one open ledger entry references this asset
    pub has_active_assignment: bool,
    pub current_assignee_id: Option<String>,
    pub current_assignee_name: Option<String>,
    pub current_assignment_id: Option<String>,
    pub current_assignment_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub assignment_history: Vec<Assignment>,
    pub maintenance_history: Vec<MaintenanceRecord>,
    pub documents: Vec<Document>,
}

/// Create asset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category_id: String,
    pub condition: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = f64)]
    pub purchase_cost: Option<Decimal>,
    pub notes: Option<String>,
}

/// Update asset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub status: Option<AssetStatus>,
    pub condition: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = f64)]
    pub purchase_cost: Option<Decimal>,
    pub is_operational: Option<bool>,
    pub notes: Option<String>,
}
