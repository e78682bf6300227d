//! Maintenance history model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Lifecycle state of a maintenance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Requested,
    InProgress,
    Completed,
    Cancelled,
}

/// One maintenance episode for an asset
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRecord {
    pub id: String,
    pub asset_id: String,
    pub maintenance_type: String,
    pub status: MaintenanceStatus,
    pub condition_before: Option<String>,
    pub condition_after: Option<String>,
    pub maintenance_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    /// Computed from the category maintenance-frequency policy on completion
    pub next_scheduled_maintenance: Option<DateTime<Utc>>,
    #[schema(value_type = f64)]
    pub cost: Option<Decimal>,
    pub performed_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Maintenance request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    pub asset_id: String,
    #[validate(length(min = 1, max = 100))]
    pub maintenance_type: String,
    pub condition_before: Option<String>,
    pub performed_by: Option<String>,
    pub notes: Option<String>,
}

/// Maintenance completion/update payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteMaintenance {
    pub asset_id: String,
    pub maintenance_id: String,
    pub condition_after: Option<String>,
    #[schema(value_type = f64)]
    pub cost: Option<Decimal>,
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
