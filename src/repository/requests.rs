//! Approval request repository and workflow state machine.
//!
//! A decision locks the request row, updates one approver's standing, then
//! recomputes the overall status. The terminal side effect runs in the same
//! transaction, so a request can never end up resolved with its catalog
//! effect half-applied.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        id,
        request::{
            derive_overall_status, ApprovalDecision, ApprovalEffect, CreateRequest, Request,
            RequestDetails, RequestResponse, RequestStatus, RequestType,
        },
    },
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a request with its approvers
    pub async fn get(&self, id: &str) -> AppResult<RequestResponse> {
        let request = sqlx::query_as::<_, Request>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))?;

        let approvers = sqlx::query_as::<_, ApprovalDecision>(
            "SELECT * FROM approval_decisions WHERE request_id = $1 ORDER BY approver",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(RequestResponse { request, approvers })
    }

    /// List requests, newest first, optionally filtered
    pub async fn list(
        &self,
        status: Option<RequestStatus>,
        request_type: Option<RequestType>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Request>, i64)> {
        let mut conditions = Vec::new();
        let mut idx = 0;
        if status.is_some() {
            idx += 1;
            conditions.push(format!("status = ${}", idx));
        }
        if request_type.is_some() {
            idx += 1;
            conditions.push(format!("request_type = ${}", idx));
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        macro_rules! bind_filters {
            ($builder:expr) => {{
                let mut b = $builder;
                if let Some(s) = status {
                    b = b.bind(s);
                }
                if let Some(t) = request_type {
                    b = b.bind(t);
                }
                b
            }};
        }

        let count_query = format!("SELECT COUNT(*) FROM requests {}", where_clause);
        let total: i64 = bind_filters!(sqlx::query_scalar(&count_query))
            .fetch_one(&self.pool)
            .await?;

        let list_query = format!(
            "SELECT * FROM requests {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            where_clause,
            idx + 1,
            idx + 2
        );
        let requests = bind_filters!(sqlx::query_as::<_, Request>(&list_query))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((requests, total))
    }

    /// Create a request with its approver slots (all pending)
    pub async fn create(&self, data: &CreateRequest) -> AppResult<RequestResponse> {
        if data.approvers.is_empty() {
            return Err(AppError::Validation(
                "A request needs at least one approver".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        // A request referencing an asset must reference a real one
        if let RequestDetails::MaintenanceApproval { asset_id, .. }
        | RequestDetails::AssetReturn { asset_id, .. } = &data.details
        {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assets WHERE id = $1)")
                    .bind(asset_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if !exists {
                return Err(AppError::NotFound(format!("Asset {} not found", asset_id)));
            }
        }

        let request = sqlx::query_as::<_, Request>(
            r#"
            INSERT INTO requests (id, request_type, status, requestor, details)
            VALUES ($1, $2, 'pending', $3, $4)
            RETURNING *
            "#,
        )
        .bind(id::new_id(id::REQUEST_PREFIX))
        .bind(data.details.request_type())
        .bind(&data.requestor)
        .bind(Json(&data.details))
        .fetch_one(&mut *tx)
        .await?;

        let mut approvers = Vec::with_capacity(data.approvers.len());
        for approver in &data.approvers {
            let decision = sqlx::query_as::<_, ApprovalDecision>(
                r#"
                INSERT INTO approval_decisions (request_id, approver, status)
                VALUES ($1, $2, 'pending')
                RETURNING *
                "#,
            )
            .bind(&request.id)
            .bind(approver)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Validation(format!("Duplicate approver '{}'", approver))
                }
                _ => AppError::Database(e),
            })?;
            approvers.push(decision);
        }

        tx.commit().await?;
        Ok(RequestResponse { request, approvers })
    }

    /// Record one approver's decision and resolve the request when terminal.
    ///
    /// Any rejection forces the overall status to rejected; approval requires
    /// every approver. The pending→terminal transition fires the request
    /// type's catalog effect exactly once, inside the same transaction.
    pub async fn decide(
        &self,
        request_id: &str,
        approver: &str,
        decision: RequestStatus,
        notes: Option<&str>,
    ) -> AppResult<RequestResponse> {
        if !decision.is_terminal() {
            return Err(AppError::Validation(
                "Decision must be approved or rejected".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let request =
            sqlx::query_as::<_, Request>("SELECT * FROM requests WHERE id = $1 FOR UPDATE")
                .bind(request_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;

        if request.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Request {} is already {}",
                request.id,
                match request.status {
                    RequestStatus::Approved => "approved",
                    RequestStatus::Rejected => "rejected",
                    RequestStatus::Pending => unreachable!(),
                }
            )));
        }

        let updated = sqlx::query(
            r#"
            UPDATE approval_decisions
            SET status = $1, decided_at = $2, notes = COALESCE($3, notes)
            WHERE request_id = $4 AND approver = $5
            "#,
        )
        .bind(decision)
        .bind(Utc::now())
        .bind(notes)
        .bind(&request.id)
        .bind(approver)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Approver '{}' is not on request {}",
                approver, request.id
            )));
        }

        let statuses: Vec<RequestStatus> = sqlx::query_scalar(
            "SELECT status FROM approval_decisions WHERE request_id = $1",
        )
        .bind(&request.id)
        .fetch_all(&mut *tx)
        .await?;

        let overall = derive_overall_status(&statuses);
        let now = Utc::now();

        if overall.is_terminal() {
            sqlx::query(
                "UPDATE requests SET status = $1, resolved_at = $2, updated_at = $2 WHERE id = $3",
            )
            .bind(overall)
            .bind(now)
            .bind(&request.id)
            .execute(&mut *tx)
            .await?;

            // Only approval mutates the catalog; rejection resolves silently
            if overall == RequestStatus::Approved {
                Self::apply_effect(&mut tx, request.details.0.approval_effect()).await?;
            }
        } else {
            sqlx::query("UPDATE requests SET updated_at = $1 WHERE id = $2")
                .bind(now)
                .bind(&request.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        self.get(request_id).await
    }

    /// Apply the catalog side effect of an approved request
    async fn apply_effect(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        effect: ApprovalEffect,
    ) -> AppResult<()> {
        match effect {
            ApprovalEffect::PlaceUnderMaintenance { asset_id } => {
                let result = sqlx::query(
                    "UPDATE assets SET status = 'under_maintenance', updated_at = $1 WHERE id = $2",
                )
                .bind(Utc::now())
                .bind(&asset_id)
                .execute(&mut **tx)
                .await?;
                if result.rows_affected() == 0 {
                    tracing::warn!("Approved maintenance for missing asset {}", asset_id);
                }
            }
            ApprovalEffect::ReleaseAsset { asset_id } => {
                let now = Utc::now();
                sqlx::query(
                    r#"
                    UPDATE assignments
                    SET status = 'returned', return_date = $1
                    WHERE asset_id = $2 AND return_date IS NULL
                    "#,
                )
                .bind(now)
                .bind(&asset_id)
                .execute(&mut **tx)
                .await?;

                let result = sqlx::query(
                    "UPDATE assets SET status = 'available', updated_at = $1 WHERE id = $2",
                )
                .bind(now)
                .bind(&asset_id)
                .execute(&mut **tx)
                .await?;
                if result.rows_affected() == 0 {
                    tracing::warn!("Approved return for missing asset {}", asset_id);
                }
            }
            ApprovalEffect::LogOnly => {
                tracing::info!("Request approved with no catalog effect");
            }
        }
        Ok(())
    }
}
