//! Assignment coordination service.
//!
//! Resolves the expected return date policy, then delegates the transactional
//! state transition to the repository.

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::AssignmentConfig,
    error::{AppError, AppResult},
    models::{
        asset::AssetDetails,
        assignment::{
            Assignment, AssignmentDetails, CloseAssignment, CreateAssignment, DurationUnit,
        },
    },
    repository::Repository,
};

/// Caller-supplied options for opening an episode
#[derive(Debug, Default)]
pub struct AssignOptions {
    pub duration: Option<i64>,
    pub duration_unit: Option<DurationUnit>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub condition: Option<String>,
    pub notes: Option<String>,
}

/// Caller-supplied options for closing an episode
#[derive(Debug, Default)]
pub struct UnassignOptions {
    pub return_date: Option<DateTime<Utc>>,
    pub condition_after: Option<String>,
    pub notes: Option<String>,
}

/// Resolve the expected return date: explicit duration+unit wins, then an
/// explicit date, then the configured default.
pub fn resolve_return_date(
    now: DateTime<Utc>,
    options: &AssignOptions,
    default_duration_days: i64,
) -> AppResult<DateTime<Utc>> {
    if let Some(duration) = options.duration {
        if duration <= 0 {
            return Err(AppError::Validation(
                "duration must be a positive number".to_string(),
            ));
        }
        let unit = options.duration_unit.unwrap_or(DurationUnit::Days);
        return Ok(now + Duration::days(duration * unit.days()));
    }
    if let Some(date) = options.expected_return_date {
        return Ok(date);
    }
    Ok(now + Duration::days(default_duration_days))
}

#[derive(Clone)]
pub struct AssignmentsService {
    repository: Repository,
    config: AssignmentConfig,
}

impl AssignmentsService {
    pub fn new(repository: Repository, config: AssignmentConfig) -> Self {
        Self { repository, config }
    }

    /// Assign an asset to an employee
    pub async fn assign(
        &self,
        asset_id: &str,
        employee_id: &str,
        options: AssignOptions,
    ) -> AppResult<(Assignment, AssetDetails)> {
        let expected_return_date =
            resolve_return_date(Utc::now(), &options, self.config.default_duration_days)?;

        let assignment = self
            .repository
            .assignments
            .open_episode(&CreateAssignment {
                asset_id: asset_id.to_string(),
                employee_id: employee_id.to_string(),
                expected_return_date: Some(expected_return_date),
                condition_at_assignment: options.condition,
                notes: options.notes,
            })
            .await?;

        let details = self.repository.assets.get_details(asset_id).await?;
        Ok((assignment, details))
    }

    /// Close an assignment episode
    pub async fn unassign(
        &self,
        assignment_id: &str,
        options: UnassignOptions,
    ) -> AppResult<(Assignment, AssetDetails)> {
        let assignment = self
            .repository
            .assignments
            .close_episode(&CloseAssignment {
                assignment_id: assignment_id.to_string(),
                return_date: options.return_date,
                condition_after: options.condition_after,
                notes: options.notes,
            })
            .await?;

        let details = self
            .repository
            .assets
            .get_details(&assignment.asset_id)
            .await?;
        Ok((assignment, details))
    }

    /// List ledger entries
    pub async fn list(
        &self,
        asset_id: Option<&str>,
        employee_id: Option<&str>,
        active_only: bool,
    ) -> AppResult<Vec<AssignmentDetails>> {
        self.repository
            .assignments
            .list(asset_id, employee_id, active_only)
            .await
    }

    /// Episodes for one asset
    pub async fn history_for_asset(&self, asset_id: &str) -> AppResult<Vec<AssignmentDetails>> {
        // Verify the asset exists so a bad id is a 404, not an empty list
        self.repository.assets.get_by_id(asset_id).await?;
        self.repository
            .assignments
            .list(Some(asset_id), None, false)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-01-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_duration_takes_priority() {
        let options = AssignOptions {
            duration: Some(2),
            duration_unit: Some(DurationUnit::Weeks),
            expected_return_date: Some(now() + Duration::days(900)),
            ..Default::default()
        };
        let resolved = resolve_return_date(now(), &options, 365).unwrap();
        assert_eq!(resolved, now() + Duration::days(14));
    }

    #[test]
    fn test_explicit_date_beats_default() {
        let explicit = now() + Duration::days(42);
        let options = AssignOptions {
            expected_return_date: Some(explicit),
            ..Default::default()
        };
        assert_eq!(resolve_return_date(now(), &options, 365).unwrap(), explicit);
    }

    #[test]
    fn test_default_is_365_days() {
        let options = AssignOptions::default();
        let resolved = resolve_return_date(now(), &options, 365).unwrap();
        assert_eq!(resolved, now() + Duration::days(365));
    }

    #[test]
    fn test_month_and_year_units() {
        let options = AssignOptions {
            duration: Some(3),
            duration_unit: Some(DurationUnit::Months),
            ..Default::default()
        };
        assert_eq!(
            resolve_return_date(now(), &options, 365).unwrap(),
            now() + Duration::days(90)
        );

        let options = AssignOptions {
            duration: Some(1),
            duration_unit: Some(DurationUnit::Years),
            ..Default::default()
        };
        assert_eq!(
            resolve_return_date(now(), &options, 365).unwrap(),
            now() + Duration::days(365)
        );
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let options = AssignOptions {
            duration: Some(0),
            ..Default::default()
        };
        assert!(resolve_return_date(now(), &options, 365).is_err());
    }
}
