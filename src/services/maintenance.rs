//! Maintenance tracking service

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppResult,
    models::{
        asset::AssetDetails,
        maintenance::{CompleteMaintenance, CreateMaintenance, MaintenanceRecord},
    },
    repository::Repository,
};

/// Parse a maintenance-frequency policy string of the form "<int> <unit>"
/// with unit in days/months/years (months ≈ 30 days, years ≈ 365 days).
/// Returns None for a malformed policy; a missing next date is not an error.
pub fn parse_frequency(policy: &str) -> Option<Duration> {
    let mut parts = policy.split_whitespace();
    let value: i64 = parts.next()?.parse().ok()?;
    if value <= 0 {
        return None;
    }
    let unit = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let days = match unit.to_ascii_lowercase().as_str() {
        "day" | "days" => 1,
        "month" | "months" => 30,
        "year" | "years" => 365,
        _ => return None,
    };
    Some(Duration::days(value * days))
}

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Maintenance records for one asset
    pub async fn history_for_asset(&self, asset_id: &str) -> AppResult<Vec<MaintenanceRecord>> {
        self.repository.assets.get_by_id(asset_id).await?;
        self.repository.maintenance.list_for_asset(asset_id).await
    }

    /// Request maintenance for an asset
    pub async fn request(&self, data: CreateMaintenance) -> AppResult<AssetDetails> {
        self.repository.maintenance.open_request(&data).await?;
        self.repository.assets.get_details(&data.asset_id).await
    }

    /// Complete a maintenance record and schedule the next cycle from the
    /// category's frequency policy
    pub async fn complete(&self, data: CompleteMaintenance) -> AppResult<AssetDetails> {
        let asset = self.repository.assets.get_by_id(&data.asset_id).await?;
        let category = self
            .repository
            .categories
            .get_by_id(&asset.category_id)
            .await?;

        let completed_date = data.completed_date.unwrap_or_else(Utc::now);
        let next_scheduled = next_scheduled_maintenance(
            completed_date,
            category.maintenance_frequency.as_deref(),
        );

        self.repository.maintenance.complete(&data, next_scheduled).await?;
        self.repository.assets.get_details(&data.asset_id).await
    }
}

/// Next maintenance date from the completion date and the category policy
fn next_scheduled_maintenance(
    completed_date: DateTime<Utc>,
    policy: Option<&str>,
) -> Option<DateTime<Utc>> {
    policy
        .and_then(parse_frequency)
        .map(|interval| completed_date + interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_frequency("30 days"), Some(Duration::days(30)));
        assert_eq!(parse_frequency("6 months"), Some(Duration::days(180)));
        assert_eq!(parse_frequency("1 year"), Some(Duration::days(365)));
        assert_eq!(parse_frequency("2 Years"), Some(Duration::days(730)));
    }

    #[test]
    fn test_malformed_frequency_is_none() {
        assert_eq!(parse_frequency(""), None);
        assert_eq!(parse_frequency("monthly"), None);
        assert_eq!(parse_frequency("6 fortnights"), None);
        assert_eq!(parse_frequency("six months"), None);
        assert_eq!(parse_frequency("-3 days"), None);
        assert_eq!(parse_frequency("6 months extra"), None);
    }

    #[test]
    fn test_next_scheduled_from_policy() {
        let completed: DateTime<Utc> = "2026-03-01T00:00:00Z".parse().unwrap();
        assert_eq!(
            next_scheduled_maintenance(completed, Some("3 months")),
            Some(completed + Duration::days(90))
        );
        assert_eq!(next_scheduled_maintenance(completed, Some("weekly")), None);
        assert_eq!(next_scheduled_maintenance(completed, None), None);
    }
}
