//! Assignment ledger repository.
//!
//! Opening and closing an episode touches the ledger and the asset row in a
//! single transaction, with the asset row locked first so concurrent calls
//! on the same asset serialize instead of racing the status check.

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{Asset, AssetStatus},
        assignment::{Assignment, AssignmentDetails, CloseAssignment, CreateAssignment},
        employee::Employee,
        id,
    },
};

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a ledger entry by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))
    }

    /// List ledger entries, newest first, optionally filtered
    pub async fn list(
        &self,
        asset_id: Option<&str>,
        employee_id: Option<&str>,
        active_only: bool,
    ) -> AppResult<Vec<AssignmentDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 0;
        if asset_id.is_some() {
            idx += 1;
            conditions.push(format!("a.asset_id = ${}", idx));
        }
        if employee_id.is_some() {
            idx += 1;
            conditions.push(format!("a.employee_id = ${}", idx));
        }
        if active_only {
            conditions.push("a.return_date IS NULL".to_string());
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            r#"
            SELECT a.*, ast.name AS asset_name, e.name AS employee_name
            FROM assignments a
            JOIN assets ast ON a.asset_id = ast.id
            JOIN employees e ON a.employee_id = e.id
            {}
            ORDER BY a.assignment_date DESC
            "#,
            where_clause
        );

        let mut builder = sqlx::query(&query);
        if let Some(aid) = asset_id {
            builder = builder.bind(aid);
        }
        if let Some(eid) = employee_id {
            builder = builder.bind(eid);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            result.push(AssignmentDetails {
                assignment: Assignment {
                    id: row.get("id"),
                    asset_id: row.get("asset_id"),
                    employee_id: row.get("employee_id"),
                    assignment_date: row.get("assignment_date"),
                    expected_return_date: row.get("expected_return_date"),
                    return_date: row.get("return_date"),
                    status: row.get("status"),
                    condition_at_assignment: row.get("condition_at_assignment"),
                    condition_after: row.get("condition_after"),
                    notes: row.get("notes"),
                    created_at: row.get("created_at"),
                },
                asset_name: row.get("asset_name"),
                employee_name: row.get("employee_name"),
            });
        }
        Ok(result)
    }

    /// Open a new assignment episode.
    ///
    /// Locks the asset row, checks the category's multiple-assignment policy
    /// against the open episodes, inserts the ledger row and flips the asset
    /// status, all in one transaction.
    pub async fn open_episode(&self, params: &CreateAssignment) -> AppResult<Assignment> {
        let mut tx = self.pool.begin().await?;

        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 FOR UPDATE")
            .bind(&params.asset_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", params.asset_id)))?;

        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(&params.employee_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Employee {} not found", params.employee_id))
            })?;

        if !employee.is_active {
            return Err(AppError::BusinessRule(format!(
                "Employee {} is not active",
                employee.id
            )));
        }

        let allow_multiple: bool = sqlx::query_scalar(
            "SELECT allow_multiple_assignments FROM categories WHERE id = $1",
        )
        .bind(&asset.category_id)
        .fetch_one(&mut *tx)
        .await?;

        let open_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assignments WHERE asset_id = $1 AND return_date IS NULL",
        )
        .bind(&asset.id)
        .fetch_one(&mut *tx)
        .await?;

        if open_count > 0 && !allow_multiple {
            return Err(AppError::Conflict(format!(
                "Asset {} is already assigned and its category does not allow multiple assignments",
                asset.id
            )));
        }

        match asset.status {
            AssetStatus::Available => {}
            AssetStatus::Assigned if allow_multiple => {}
            other => {
                return Err(AppError::Conflict(format!(
                    "Asset {} cannot be assigned while {}",
                    asset.id,
                    other.as_code()
                )));
            }
        }

        let now = Utc::now();
        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (
                id, asset_id, employee_id, assignment_date, expected_return_date,
                status, condition_at_assignment, notes
            )
            VALUES ($1, $2, $3, $4, $5, 'active', $6, $7)
            RETURNING *
            "#,
        )
        .bind(id::new_id(id::ASSIGNMENT_PREFIX))
        .bind(&asset.id)
        .bind(&employee.id)
        .bind(now)
        .bind(params.expected_return_date)
        .bind(&params.condition_at_assignment)
        .bind(&params.notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE assets SET status = 'assigned', updated_at = $1 WHERE id = $2")
            .bind(now)
            .bind(&asset.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// Close an assignment episode.
    ///
    /// Closing an already-returned episode is rejected so derived counters
    /// can never be decremented twice.
    pub async fn close_episode(&self, params: &CloseAssignment) -> AppResult<Assignment> {
        let mut tx = self.pool.begin().await?;

        let assignment = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE id = $1 FOR UPDATE",
        )
        .bind(&params.assignment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Assignment {} not found", params.assignment_id))
        })?;

        if assignment.return_date.is_some() {
            return Err(AppError::Conflict(format!(
                "Assignment {} already returned",
                assignment.id
            )));
        }

        // Lock the asset row before touching its status
        sqlx::query("SELECT id FROM assets WHERE id = $1 FOR UPDATE")
            .bind(&assignment.asset_id)
            .execute(&mut *tx)
            .await?;

        let return_date = params.return_date.unwrap_or_else(Utc::now);
        let closed = sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE assignments
            SET status = 'returned', return_date = $1, condition_after = $2,
                notes = COALESCE($3, notes)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(return_date)
        .bind(&params.condition_after)
        .bind(&params.notes)
        .bind(&assignment.id)
        .fetch_one(&mut *tx)
        .await?;

        // The asset becomes available again once its last episode closes
        let remaining: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assignments WHERE asset_id = $1 AND return_date IS NULL",
        )
        .bind(&assignment.asset_id)
        .fetch_one(&mut *tx)
        .await?;

        if remaining == 0 {
            sqlx::query(
                r#"
                UPDATE assets
                SET status = 'available', condition = COALESCE($1, condition), updated_at = $2
                WHERE id = $3
                "#,
            )
            .bind(&params.condition_after)
            .bind(Utc::now())
            .bind(&assignment.asset_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(closed)
    }

    /// Count open episodes across the whole ledger
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM assignments WHERE return_date IS NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count open episodes past their expected return date
    pub async fn count_overdue(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assignments WHERE return_date IS NULL AND expected_return_date < NOW()",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
