//! Assignment ledger model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Lifecycle state of one assignment episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
pub enum AssignmentStatus {
    Active,
    Returned,
}

/// One assignment episode linking an asset to an employee.
///
/// Created on assign with a null `return_date`; mutated exactly once on
/// unassign; never deleted. This table is the source of truth for every
/// "currently assigned" view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: String,
    pub asset_id: String,
    pub employee_id: String,
    pub assignment_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    /// Null while the episode is open
    pub return_date: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
    pub condition_at_assignment: Option<String>,
    pub condition_after: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Ledger entry joined with asset and employee names for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssignmentDetails {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub asset_name: String,
    pub employee_name: String,
}

/// Unit for an explicit assignment duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl DurationUnit {
    /// Approximate length in days (months ≈ 30, years ≈ 365)
    pub fn days(&self) -> i64 {
        match self {
            DurationUnit::Days => 1,
            DurationUnit::Weeks => 7,
            DurationUnit::Months => 30,
            DurationUnit::Years => 365,
        }
    }
}

/// Parameters for opening an assignment episode
#[derive(Debug)]
pub struct CreateAssignment {
    pub asset_id: String,
    pub employee_id: String,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub condition_at_assignment: Option<String>,
    pub notes: Option<String>,
}

/// Parameters for closing an assignment episode
#[derive(Debug)]
pub struct CloseAssignment {
    pub assignment_id: String,
    pub return_date: Option<DateTime<Utc>>,
    pub condition_after: Option<String>,
    pub notes: Option<String>,
}
