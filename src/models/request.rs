//! Approval request model.
//!
//! The request payload is a tagged union: one variant per request type, each
//! with its own typed fields. The terminal-status side effect is resolved
//! through [`RequestDetails::approval_effect`] rather than a branching chain,
//! so adding a request type means adding a variant and one mapping arm.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Approval workflow state (terminal once approved or rejected)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// Kind of approval request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "request_type", rename_all = "snake_case")]
pub enum RequestType {
    MaintenanceApproval,
    AssetReturn,
    Purchase,
}

/// Typed request payload, one variant per request type
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestDetails {
    MaintenanceApproval {
        asset_id: String,
        #[serde(default)]
        reason: Option<String>,
    },
    AssetReturn {
        asset_id: String,
        #[serde(default)]
        notes: Option<String>,
    },
    Purchase {
        name: String,
        #[serde(default)]
        category_id: Option<String>,
        #[serde(default)]
        #[schema(value_type = Option<f64>)]
        estimated_cost: Option<Decimal>,
        #[serde(default)]
        justification: Option<String>,
    },
}

/// Side effect applied to the related asset when a request reaches a
/// terminal approved status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalEffect {
    /// Move the asset under maintenance
    PlaceUnderMaintenance { asset_id: String },
    /// Close the asset's open assignments and make it available again
    ReleaseAsset { asset_id: String },
    /// Nothing to do on the catalog; the approval itself is the outcome
    LogOnly,
}

impl RequestDetails {
    pub fn request_type(&self) -> RequestType {
        match self {
            RequestDetails::MaintenanceApproval { .. } => RequestType::MaintenanceApproval,
            RequestDetails::AssetReturn { .. } => RequestType::AssetReturn,
            RequestDetails::Purchase { .. } => RequestType::Purchase,
        }
    }

    /// Type→effect mapping for the approved terminal state
    pub fn approval_effect(&self) -> ApprovalEffect {
        match self {
            RequestDetails::MaintenanceApproval { asset_id, .. } => {
                ApprovalEffect::PlaceUnderMaintenance {
                    asset_id: asset_id.clone(),
                }
            }
            RequestDetails::AssetReturn { asset_id, .. } => ApprovalEffect::ReleaseAsset {
                asset_id: asset_id.clone(),
            },
            RequestDetails::Purchase { .. } => ApprovalEffect::LogOnly,
        }
    }
}

/// Approval request as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Request {
    pub id: String,
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub requestor: String,
    #[schema(value_type = RequestDetails)]
    pub details: Json<RequestDetails>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One approver's standing on a request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ApprovalDecision {
    pub request_id: String,
    pub approver: String,
    pub status: RequestStatus,
    pub decided_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Request with its approvers for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestResponse {
    #[serde(flatten)]
    pub request: Request,
    pub approvers: Vec<ApprovalDecision>,
}

/// Create request payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequest {
    pub requestor: String,
    pub details: RequestDetails,
    /// Approvers whose unanimous approval resolves the request
    pub approvers: Vec<String>,
}

/// Overall status derived from the individual approver decisions: any
/// rejection forces rejected; approved only when every approver approved.
pub fn derive_overall_status(decisions: &[RequestStatus]) -> RequestStatus {
    if decisions.iter().any(|d| *d == RequestStatus::Rejected) {
        RequestStatus::Rejected
    } else if !decisions.is_empty() && decisions.iter().all(|d| *d == RequestStatus::Approved) {
        RequestStatus::Approved
    } else {
        RequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rejection_wins() {
        let decisions = [
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Pending,
        ];
        assert_eq!(derive_overall_status(&decisions), RequestStatus::Rejected);
    }

    #[test]
    fn test_unanimous_approval() {
        let decisions = [RequestStatus::Approved, RequestStatus::Approved];
        assert_eq!(derive_overall_status(&decisions), RequestStatus::Approved);
    }

    #[test]
    fn test_pending_while_undecided() {
        let decisions = [RequestStatus::Approved, RequestStatus::Pending];
        assert_eq!(derive_overall_status(&decisions), RequestStatus::Pending);
        assert_eq!(derive_overall_status(&[]), RequestStatus::Pending);
    }

    #[test]
    fn test_effect_mapping() {
        let details = RequestDetails::MaintenanceApproval {
            asset_id: "AST-00000001".into(),
            reason: None,
        };
        assert_eq!(
            details.approval_effect(),
            ApprovalEffect::PlaceUnderMaintenance {
                asset_id: "AST-00000001".into()
            }
        );

        let purchase = RequestDetails::Purchase {
            name: "Laptop".into(),
            category_id: None,
            estimated_cost: None,
            justification: None,
        };
        assert_eq!(purchase.approval_effect(), ApprovalEffect::LogOnly);
    }
}
