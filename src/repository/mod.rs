//! Repository layer for database operations

pub mod assets;
pub mod assignments;
pub mod categories;
pub mod documents;
pub mod employees;
pub mod maintenance;
pub mod requests;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub assets: assets::AssetsRepository,
    pub categories: categories::CategoriesRepository,
    pub employees: employees::EmployeesRepository,
    pub assignments: assignments::AssignmentsRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub requests: requests::RequestsRepository,
    pub documents: documents::DocumentsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: assets::AssetsRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            documents: documents::DocumentsRepository::new(pool.clone()),
            pool,
        }
    }
}
