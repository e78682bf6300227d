//! Category repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        category::{Category, CreateCategory, UpdateCategory},
        id,
    },
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a category by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Create a category
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (
                id, name, description, allow_multiple_assignments,
                requires_maintenance, maintenance_frequency
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id::new_id(id::CATEGORY_PREFIX))
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.allow_multiple_assignments)
        .bind(data.requires_maintenance)
        .bind(&data.maintenance_frequency)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Category name '{}' already exists", data.name))
            }
            _ => AppError::Database(e),
        })?;
        Ok(category)
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: &UpdateCategory) -> AppResult<Category> {
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
        add_field!(data.description, "description");
        add_field!(data.allow_multiple_assignments, "allow_multiple_assignments");
        add_field!(data.requires_maintenance, "requires_maintenance");
        add_field!(data.maintenance_frequency, "maintenance_frequency");

        let query = format!(
            "UPDATE categories SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Category>(&query).bind(now);

        if let Some(ref name) = data.name {
            builder = builder.bind(name);
        }
        if let Some(ref description) = data.description {
            builder = builder.bind(description);
        }
        if let Some(multi) = data.allow_multiple_assignments {
            builder = builder.bind(multi);
        }
        if let Some(req) = data.requires_maintenance {
            builder = builder.bind(req);
        }
        if let Some(ref freq) = data.maintenance_frequency {
            builder = builder.bind(freq);
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category; refused while assets reference it
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let asset_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE category_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if asset_count > 0 {
            return Err(AppError::Conflict(format!(
                "Category {} still has {} asset(s)",
                id, asset_count
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}
