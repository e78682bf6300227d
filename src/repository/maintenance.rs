//! Maintenance history repository

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::Asset,
        id,
        maintenance::{CompleteMaintenance, CreateMaintenance, MaintenanceRecord},
    },
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Maintenance records for one asset, newest first
    pub async fn list_for_asset(&self, asset_id: &str) -> AppResult<Vec<MaintenanceRecord>> {
        let rows = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE asset_id = $1 ORDER BY maintenance_date DESC",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open a maintenance request.
    ///
    /// Only allowed for assets whose category takes part in the maintenance
    /// cycle; flips the asset to maintenance_requested in the same
    /// transaction.
    pub async fn open_request(&self, data: &CreateMaintenance) -> AppResult<MaintenanceRecord> {
        let mut tx = self.pool.begin().await?;

        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 FOR UPDATE")
            .bind(&data.asset_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", data.asset_id)))?;

        let requires_maintenance: bool =
            sqlx::query_scalar("SELECT requires_maintenance FROM categories WHERE id = $1")
                .bind(&asset.category_id)
                .fetch_one(&mut *tx)
                .await?;

        if !requires_maintenance {
            return Err(AppError::BusinessRule(format!(
                "Category {} does not require maintenance",
                asset.category_id
            )));
        }

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (
                id, asset_id, maintenance_type, status, condition_before,
                performed_by, notes
            )
            VALUES ($1, $2, $3, 'requested', $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id::new_id(id::MAINTENANCE_PREFIX))
        .bind(&asset.id)
        .bind(&data.maintenance_type)
        .bind(data.condition_before.as_deref().or(asset.condition.as_deref()))
        .bind(&data.performed_by)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE assets SET status = 'maintenance_requested', updated_at = $1 WHERE id = $2",
        )
        .bind(Utc::now())
        .bind(&asset.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Complete a maintenance record and return the asset to service.
    ///
    /// `next_scheduled` is computed by the caller from the category policy;
    /// a missing value simply leaves the next date unset.
    pub async fn complete(
        &self,
        params: &CompleteMaintenance,
        next_scheduled: Option<DateTime<Utc>>,
    ) -> AppResult<MaintenanceRecord> {
        let mut tx = self.pool.begin().await?;

        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 FOR UPDATE")
            .bind(&params.asset_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", params.asset_id)))?;

        let existing = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE id = $1 AND asset_id = $2",
        )
        .bind(&params.maintenance_id)
        .bind(&asset.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Maintenance record {} not found for asset {}",
                params.maintenance_id, params.asset_id
            ))
        })?;

        let completed_date = params.completed_date.unwrap_or_else(Utc::now);
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET status = 'completed', completed_date = $1, condition_after = $2,
                cost = COALESCE($3, cost), next_scheduled_maintenance = $4,
                notes = COALESCE($5, notes)
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(completed_date)
        .bind(&params.condition_after)
        .bind(params.cost)
        .bind(next_scheduled)
        .bind(&params.notes)
        .bind(&existing.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE assets
            SET status = 'available', is_operational = TRUE,
                next_maintenance_date = $1, condition = COALESCE($2, condition),
                updated_at = $3
            WHERE id = $4
            "#,
        )
        .bind(next_scheduled)
        .bind(&params.condition_after)
        .bind(Utc::now())
        .bind(&asset.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }
}
