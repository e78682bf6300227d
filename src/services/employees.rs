//! Employee directory service

use crate::{
    error::AppResult,
    models::{
        asset::Asset,
        employee::{CreateEmployee, Employee, EmployeeDetails, UpdateEmployee},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        department: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Employee>, i64)> {
        self.repository.employees.list(department, limit, offset).await
    }

    pub async fn get(&self, id: &str) -> AppResult<EmployeeDetails> {
        self.repository.employees.get_details(id).await
    }

    /// Assets currently assigned to an employee
    pub async fn current_assets(&self, id: &str) -> AppResult<Vec<Asset>> {
        // Verify the employee exists so a bad id is a 404, not an empty list
        self.repository.employees.get_by_id(id).await?;
        self.repository.employees.current_assets(id).await
    }

    pub async fn create(&self, data: CreateEmployee) -> AppResult<Employee> {
        self.repository.employees.create(&data).await
    }

    pub async fn update(&self, id: &str, data: UpdateEmployee) -> AppResult<Employee> {
        self.repository.employees.update(id, &data).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.employees.delete(id).await
    }
}
