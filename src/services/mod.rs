//! Business logic services

pub mod analytics;
pub mod assets;
pub mod assignments;
pub mod employees;
pub mod maintenance;
pub mod requests;

use crate::{config::AssignmentConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: assets::AssetsService,
    pub employees: employees::EmployeesService,
    pub assignments: assignments::AssignmentsService,
    pub analytics: analytics::AnalyticsService,
    pub maintenance: maintenance::MaintenanceService,
    pub requests: requests::RequestsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, assignment_config: AssignmentConfig) -> Self {
        Self {
            assets: assets::AssetsService::new(repository.clone()),
            employees: employees::EmployeesService::new(repository.clone()),
            assignments: assignments::AssignmentsService::new(
                repository.clone(),
                assignment_config.clone(),
            ),
            analytics: analytics::AnalyticsService::new(repository.clone(), assignment_config),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            requests: requests::RequestsService::new(repository),
        }
    }
}
