//! Employee directory repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::Asset,
        employee::{CreateEmployee, Employee, EmployeeDetails, UpdateEmployee},
        id,
    },
};

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get an employee by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    /// List employees with pagination
    pub async fn list(
        &self,
        department: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Employee>, i64)> {
        let (total, employees) = match department {
            Some(dep) => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department = $1")
                        .bind(dep)
                        .fetch_one(&self.pool)
                        .await?;
                let employees = sqlx::query_as::<_, Employee>(
                    "SELECT * FROM employees WHERE department = $1 ORDER BY name LIMIT $2 OFFSET $3",
                )
                .bind(dep)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
                (total, employees)
            }
            None => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
                    .fetch_one(&self.pool)
                    .await?;
                let employees = sqlx::query_as::<_, Employee>(
                    "SELECT * FROM employees ORDER BY name LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
                (total, employees)
            }
        };
        Ok((employees, total))
    }

    /// Get an employee with their currently assigned assets.
    ///
    /// The asset list is the set of assets with an open ledger entry for this
    /// employee; the count and flag follow from it.
    pub async fn get_details(&self, id: &str) -> AppResult<EmployeeDetails> {
        let employee = self.get_by_id(id).await?;
        let current_assets = self.current_assets(id).await?;
        let count = current_assets.len() as i64;
        Ok(EmployeeDetails {
            employee,
            has_assigned_assets: count > 0,
            current_assignments_count: count,
            current_assets,
        })
    }

    /// Assets currently assigned to an employee (open ledger entries)
    pub async fn current_assets(&self, employee_id: &str) -> AppResult<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(
            r#"
            SELECT ast.*
            FROM assignments a
            JOIN assets ast ON a.asset_id = ast.id
            WHERE a.employee_id = $1 AND a.return_date IS NULL
            ORDER BY a.assignment_date DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    /// Create an employee
    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (id, name, email, department, job_title, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id::new_id(id::EMPLOYEE_PREFIX))
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.department)
        .bind(&data.job_title)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Email {} already in use", data.email))
            }
            _ => AppError::Database(e),
        })?;
        Ok(employee)
    }

    /// Update an employee
    pub async fn update(&self, id: &str, data: &UpdateEmployee) -> AppResult<Employee> {
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
        add_field!(data.email, "email");
        add_field!(data.department, "department");
        add_field!(data.job_title, "job_title");
        add_field!(data.phone, "phone");
        add_field!(data.is_active, "is_active");

        let query = format!(
            "UPDATE employees SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Employee>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.email);
        bind_field!(data.department);
        bind_field!(data.job_title);
        bind_field!(data.phone);
        if let Some(active) = data.is_active {
            builder = builder.bind(active);
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    /// Delete an employee; refused while they hold assigned assets
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let open_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assignments WHERE employee_id = $1 AND return_date IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if open_count > 0 {
            return Err(AppError::Conflict(format!(
                "Employee {} still has {} assigned asset(s)",
                id, open_count
            )));
        }

        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    AppError::Conflict(format!("Employee {} has assignment history", id))
                }
                _ => AppError::Database(e),
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }
        Ok(())
    }
}
