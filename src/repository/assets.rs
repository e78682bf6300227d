//! Asset catalog repository

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{Asset, AssetDetails, AssetStatus, CreateAsset, UpdateAsset},
        assignment::Assignment,
        document::Document,
        id,
        maintenance::MaintenanceRecord,
    },
};

/// Filters for listing assets
#[derive(Debug, Default)]
pub struct AssetFilter {
    pub status: Option<AssetStatus>,
    pub category_id: Option<String>,
    pub department: Option<String>,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get an asset by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// List assets with filters and pagination; returns the page and the
    /// unpaginated total
    pub async fn list(
        &self,
        filter: &AssetFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Asset>, i64)> {
        let mut conditions = Vec::new();
        let mut idx = 0;

        if filter.status.is_some() {
            idx += 1;
            conditions.push(format!("status = ${}", idx));
        }
        if filter.category_id.is_some() {
            idx += 1;
            conditions.push(format!("category_id = ${}", idx));
        }
        if filter.department.is_some() {
            idx += 1;
            conditions.push(format!("department = ${}", idx));
        }
        if filter.search.is_some() {
            idx += 1;
            conditions.push(format!("name ILIKE ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        macro_rules! bind_filters {
            ($builder:expr) => {{
                let mut b = $builder;
                if let Some(status) = filter.status {
                    b = b.bind(status);
                }
                if let Some(ref cid) = filter.category_id {
                    b = b.bind(cid);
                }
                if let Some(ref dep) = filter.department {
                    b = b.bind(dep);
                }
                if let Some(ref search) = filter.search {
                    b = b.bind(format!("%{}%", search));
                }
                b
            }};
        }

        let count_query = format!("SELECT COUNT(*) FROM assets {}", where_clause);
        let total: i64 = bind_filters!(sqlx::query_scalar(&count_query))
            .fetch_one(&self.pool)
            .await?;

        let list_query = format!(
            "SELECT * FROM assets {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            where_clause,
            idx + 1,
            idx + 2
        );
        let assets = bind_filters!(sqlx::query_as::<_, Asset>(&list_query))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((assets, total))
    }

    /// Get an asset with its derived assignment state and embedded histories.
    ///
    /// The "current assignment" fields come from the open ledger entry (if
    /// any), so they are consistent with the episode history by construction.
    pub async fn get_details(&self, id: &str) -> AppResult<AssetDetails> {
        let asset = self.get_by_id(id).await?;

        let category_name: String =
            sqlx::query_scalar("SELECT name FROM categories WHERE id = $1")
                .bind(&asset.category_id)
                .fetch_one(&self.pool)
                .await?;

        // Newest open episode carries the current-assignee view
        let current = sqlx::query(
            r#"
            SELECT a.id, a.assignment_date, a.expected_return_date,
                   e.id AS employee_id, e.name AS employee_name
            FROM assignments a
            JOIN employees e ON a.employee_id = e.id
            WHERE a.asset_id = $1 AND a.return_date IS NULL
            ORDER BY a.assignment_date DESC
            LIMIT 1
            "#,
        )
        .bind(&asset.id)
        .fetch_optional(&self.pool)
        .await?;

        let assignment_history = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE asset_id = $1 ORDER BY assignment_date DESC",
        )
        .bind(&asset.id)
        .fetch_all(&self.pool)
        .await?;

        let maintenance_history = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE asset_id = $1 ORDER BY maintenance_date DESC",
        )
        .bind(&asset.id)
        .fetch_all(&self.pool)
        .await?;

        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE asset_id = $1 ORDER BY created_at DESC",
        )
        .bind(&asset.id)
        .fetch_all(&self.pool)
        .await?;

        let details = match current {
            Some(row) => AssetDetails {
                asset,
                category_name,
                has_active_assignment: true,
                current_assignee_id: Some(row.get("employee_id")),
                current_assignee_name: Some(row.get("employee_name")),
                current_assignment_id: Some(row.get("id")),
                current_assignment_date: Some(row.get("assignment_date")),
                expected_return_date: row.get("expected_return_date"),
                assignment_history,
                maintenance_history,
                documents,
            },
            None => AssetDetails {
                asset,
                category_name,
                has_active_assignment: false,
                current_assignee_id: None,
                current_assignee_name: None,
                current_assignment_id: None,
                current_assignment_date: None,
                expected_return_date: None,
                assignment_history,
                maintenance_history,
                documents,
            },
        };

        Ok(details)
    }

    /// Create an asset
    pub async fn create(&self, data: &CreateAsset) -> AppResult<Asset> {
        let category_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(&data.category_id)
                .fetch_one(&self.pool)
                .await?;
        if !category_exists {
            return Err(AppError::NotFound(format!(
                "Category {} not found",
                data.category_id
            )));
        }

        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                id, name, category_id, condition, serial_number, location,
                department, purchase_date, purchase_cost, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id::new_id(id::ASSET_PREFIX))
        .bind(&data.name)
        .bind(&data.category_id)
        .bind(&data.condition)
        .bind(&data.serial_number)
        .bind(&data.location)
        .bind(&data.department)
        .bind(data.purchase_date)
        .bind(data.purchase_cost)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Serial number already in use".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(asset)
    }

    /// Update an asset
    pub async fn update(&self, id: &str, data: &UpdateAsset) -> AppResult<Asset> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.category_id, "category_id");
        add_field!(data.status, "status");
        add_field!(data.condition, "condition");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.location, "location");
        add_field!(data.department, "department");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.purchase_cost, "purchase_cost");
        add_field!(data.is_operational, "is_operational");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE assets SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Asset>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.category_id);
        if let Some(status) = data.status {
            builder = builder.bind(status);
        }
        bind_field!(data.condition);
        bind_field!(data.serial_number);
        bind_field!(data.location);
        bind_field!(data.department);
        if let Some(d) = data.purchase_date {
            builder = builder.bind(d);
        }
        if let Some(c) = data.purchase_cost {
            builder = builder.bind(c);
        }
        if let Some(op) = data.is_operational {
            builder = builder.bind(op);
        }
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Delete an asset; refused while an assignment episode is open
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let open_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assignments WHERE asset_id = $1 AND return_date IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if open_count > 0 {
            return Err(AppError::Conflict(format!(
                "Asset {} has an active assignment",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    AppError::Conflict(format!("Asset {} has history records", id))
                }
                _ => AppError::Database(e),
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }
}
