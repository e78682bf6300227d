//! Analytics service: read-only rollups over assets, employees, the
//! assignment ledger and the maintenance history.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use crate::{
    api::analytics::{
        AcquisitionStats, AgeBucket, AssetStatsResponse, CategoryStat, DepartmentStat,
        DepartmentStatsResponse, EmployeeSortBy, EmployeeStat, EmployeeStatsResponse,
        MaintenanceMonthStat, MaintenanceStatsResponse, MonthStat, SortOrder, StatusStat,
        TimeFrame,
    },
    api::{clamp_limit, clamp_page, total_pages},
    config::AssignmentConfig,
    error::AppResult,
    models::asset::AssetStatus,
    repository::Repository,
};

/// Fixed fleet-age ranges in years
const AGE_LABELS: [&str; 5] = ["0-1 years", "1-2 years", "2-3 years", "3-4 years", "4+ years"];

/// Turn raw per-range counts into buckets with percentages.
/// Percentages are rounded to one decimal and are all 0 for an empty fleet.
fn age_buckets(counts: [i64; 5]) -> Vec<AgeBucket> {
    let total: i64 = counts.iter().sum();
    AGE_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| AgeBucket {
            range: (*label).to_string(),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                (count as f64 * 100.0 / total as f64 * 10.0).round() / 10.0
            },
        })
        .collect()
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
    config: AssignmentConfig,
}

impl AnalyticsService {
    pub fn new(repository: Repository, config: AssignmentConfig) -> Self {
        Self { repository, config }
    }

    fn page_window(&self, page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
        let limit = clamp_limit(
            limit,
            self.config.default_page_size,
            self.config.max_page_size,
        );
        let page = clamp_page(page);
        (page, limit, (page - 1) * limit)
    }

    /// Asset rollups: by category, by status, acquisition months within the
    /// window (paginated) and the fleet age distribution.
    pub async fn asset_stats(
        &self,
        time_frame: TimeFrame,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<AssetStatsResponse> {
        let pool = &self.repository.pool;
        let (page, limit, offset) = self.page_window(page, limit);
        let cutoff = (Utc::now() - Duration::days(time_frame.days())).date_naive();

        let totals = sqlx::query(
            "SELECT COUNT(*) AS total, COALESCE(SUM(purchase_cost), 0) AS value FROM assets",
        )
        .fetch_one(pool)
        .await?;
        let total_assets: i64 = totals.get("total");
        let total_value: Decimal = totals.get("value");

        let categories = sqlx::query(
            r#"
            SELECT c.id AS category_id, c.name AS category_name,
                   COUNT(a.id) AS count, COALESCE(SUM(a.purchase_cost), 0) AS total_value
            FROM categories c
            LEFT JOIN assets a ON a.category_id = c.id
            GROUP BY c.id, c.name
            ORDER BY count DESC, c.name
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| CategoryStat {
            category_id: row.get("category_id"),
            category_name: row.get("category_name"),
            count: row.get("count"),
            total_value: row.get("total_value"),
        })
        .collect();

        let statuses = sqlx::query(
            r#"
            SELECT status, COUNT(*) AS count, COALESCE(SUM(purchase_cost), 0) AS total_value
            FROM assets
            GROUP BY status
            ORDER BY count DESC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatusStat {
            status: row.get::<AssetStatus, _>("status").as_code().to_string(),
            count: row.get("count"),
            total_value: row.get("total_value"),
        })
        .collect();

        // Acquisition months are paginated by bucket, not by asset
        let total_months: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT DATE_TRUNC('month', purchase_date))
            FROM assets
            WHERE purchase_date IS NOT NULL AND purchase_date >= $1
            "#,
        )
        .bind(cutoff)
        .fetch_one(pool)
        .await?;

        let months = sqlx::query(
            r#"
            SELECT TO_CHAR(DATE_TRUNC('month', purchase_date), 'YYYY-MM') AS month,
                   COUNT(*) AS count, COALESCE(SUM(purchase_cost), 0) AS total_value
            FROM assets
            WHERE purchase_date IS NOT NULL AND purchase_date >= $1
            GROUP BY 1
            ORDER BY 1 DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(cutoff)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| MonthStat {
            month: row.get("month"),
            count: row.get("count"),
            total_value: row.get("total_value"),
        })
        .collect();

        let age_row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE age_days < 365) AS y0,
                COUNT(*) FILTER (WHERE age_days >= 365 AND age_days < 730) AS y1,
                COUNT(*) FILTER (WHERE age_days >= 730 AND age_days < 1095) AS y2,
                COUNT(*) FILTER (WHERE age_days >= 1095 AND age_days < 1460) AS y3,
                COUNT(*) FILTER (WHERE age_days >= 1460) AS y4
            FROM (
                SELECT (CURRENT_DATE - purchase_date) AS age_days
                FROM assets
                WHERE purchase_date IS NOT NULL
            ) ages
            "#,
        )
        .fetch_one(pool)
        .await?;
        let age_distribution = age_buckets([
            age_row.get("y0"),
            age_row.get("y1"),
            age_row.get("y2"),
            age_row.get("y3"),
            age_row.get("y4"),
        ]);

        Ok(AssetStatsResponse {
            time_frame,
            total_assets,
            total_value,
            categories,
            statuses,
            acquisitions: AcquisitionStats {
                months,
                total_months,
                page,
                limit,
                total_pages: total_pages(total_months, limit),
            },
            age_distribution,
        })
    }

    /// Department rollups: open ledger → employee → asset, grouped by the
    /// employee's department, restricted to assets purchased in the window.
    pub async fn department_stats(
        &self,
        time_frame: TimeFrame,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<DepartmentStatsResponse> {
        let pool = &self.repository.pool;
        let (page, limit, offset) = self.page_window(page, limit);
        let cutoff = (Utc::now() - Duration::days(time_frame.days())).date_naive();

        let total_count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT COALESCE(e.department, 'unknown'))
            FROM assignments a
            JOIN employees e ON a.employee_id = e.id
            JOIN assets ast ON a.asset_id = ast.id
            WHERE a.return_date IS NULL
              AND ast.purchase_date IS NOT NULL AND ast.purchase_date >= $1
            "#,
        )
        .bind(cutoff)
        .fetch_one(pool)
        .await?;

        let departments = sqlx::query(
            r#"
            SELECT COALESCE(e.department, 'unknown') AS department,
                   COUNT(*) AS asset_count,
                   COALESCE(SUM(ast.purchase_cost), 0) AS total_value
            FROM assignments a
            JOIN employees e ON a.employee_id = e.id
            JOIN assets ast ON a.asset_id = ast.id
            WHERE a.return_date IS NULL
              AND ast.purchase_date IS NOT NULL AND ast.purchase_date >= $1
            GROUP BY 1
            ORDER BY total_value DESC, department
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(cutoff)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| DepartmentStat {
            department: row.get("department"),
            asset_count: row.get("asset_count"),
            total_value: row.get("total_value"),
        })
        .collect();

        Ok(DepartmentStatsResponse {
            time_frame,
            departments,
            total_count,
            page,
            limit,
            total_pages: total_pages(total_count, limit),
        })
    }

    /// Maintenance rollups: records per month within the window
    pub async fn maintenance_stats(
        &self,
        time_frame: TimeFrame,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<MaintenanceStatsResponse> {
        let pool = &self.repository.pool;
        let (page, limit, offset) = self.page_window(page, limit);
        let cutoff = Utc::now() - Duration::days(time_frame.days());

        let totals = sqlx::query(
            r#"
            SELECT COUNT(*) AS total, COALESCE(SUM(cost), 0) AS cost
            FROM maintenance_records
            WHERE maintenance_date >= $1
            "#,
        )
        .bind(cutoff)
        .fetch_one(pool)
        .await?;
        let total_records: i64 = totals.get("total");
        let total_cost: Decimal = totals.get("cost");

        let total_months: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT DATE_TRUNC('month', maintenance_date))
            FROM maintenance_records
            WHERE maintenance_date >= $1
            "#,
        )
        .bind(cutoff)
        .fetch_one(pool)
        .await?;

        let months = sqlx::query(
            r#"
            SELECT TO_CHAR(DATE_TRUNC('month', maintenance_date), 'YYYY-MM') AS month,
                   COUNT(*) AS count, COALESCE(SUM(cost), 0) AS total_cost
            FROM maintenance_records
            WHERE maintenance_date >= $1
            GROUP BY 1
            ORDER BY 1 DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(cutoff)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| MaintenanceMonthStat {
            month: row.get("month"),
            count: row.get("count"),
            total_cost: row.get("total_cost"),
        })
        .collect();

        Ok(MaintenanceStatsResponse {
            time_frame,
            total_records,
            total_cost,
            months,
            total_months,
            page,
            limit,
            total_pages: total_pages(total_months, limit),
        })
    }

    /// Employee rollups: count and value of each employee's currently
    /// assigned assets
    pub async fn employee_stats(
        &self,
        sort_by: EmployeeSortBy,
        sort_order: SortOrder,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<EmployeeStatsResponse> {
        let pool = &self.repository.pool;
        let (page, limit, offset) = self.page_window(page, limit);

        let order_by = match sort_by {
            EmployeeSortBy::Name => "e.name",
            EmployeeSortBy::Department => "e.department",
            EmployeeSortBy::Count => "assigned_count",
            EmployeeSortBy::Value => "total_value",
        };
        let direction = match sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(pool)
            .await?;

        let query = format!(
            r#"
            SELECT e.id AS employee_id, e.name, e.department,
                   COALESCE(held.assigned_count, 0) AS assigned_count,
                   COALESCE(held.total_value, 0) AS total_value
            FROM employees e
            LEFT JOIN (
                SELECT a.employee_id,
                       COUNT(*) AS assigned_count,
                       COALESCE(SUM(ast.purchase_cost), 0) AS total_value
                FROM assignments a
                JOIN assets ast ON a.asset_id = ast.id
                WHERE a.return_date IS NULL
                GROUP BY a.employee_id
            ) held ON held.employee_id = e.id
            ORDER BY {order_by} {direction}, e.id ASC
            LIMIT $1 OFFSET $2
            "#
        );

        let employees = sqlx::query(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|row| EmployeeStat {
                employee_id: row.get("employee_id"),
                name: row.get("name"),
                department: row.get("department"),
                assigned_count: row.get("assigned_count"),
                total_value: row.get("total_value"),
            })
            .collect();

        Ok(EmployeeStatsResponse {
            employees,
            total_count,
            page,
            limit,
            total_pages: total_pages(total_count, limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_buckets_sum_to_100() {
        let buckets = age_buckets([3, 2, 1, 1, 1]);
        let sum: f64 = buckets.iter().map(|b| b.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.1, "sum was {}", sum);
    }

    #[test]
    fn test_age_buckets_rounding() {
        // Three equal thirds: 33.3 each, sum 99.9, inside the tolerance
        let buckets = age_buckets([1, 1, 1, 0, 0]);
        assert_eq!(buckets[0].percentage, 33.3);
        let sum: f64 = buckets.iter().map(|b| b.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.1);
    }

    #[test]
    fn test_age_buckets_empty_fleet() {
        let buckets = age_buckets([0, 0, 0, 0, 0]);
        assert_eq!(buckets.len(), 5);
        assert!(buckets.iter().all(|b| b.count == 0 && b.percentage == 0.0));
    }

    #[test]
    fn test_age_bucket_labels() {
        let buckets = age_buckets([5, 0, 0, 0, 2]);
        assert_eq!(buckets[0].range, "0-1 years");
        assert_eq!(buckets[4].range, "4+ years");
        assert_eq!(buckets[0].count, 5);
        assert_eq!(buckets[4].count, 2);
    }
}
