//! Report assembly
//!
//! Computes the covered date range across the full dataset and materializes
//! the seven aggregation views in their fixed presentation order. No new
//! arithmetic happens here beyond the date range; this stage is pure
//! sequencing. Rendering is the formatter's job (see [`crate::output`]).

use crate::aggregation::{
    self, RepoCost, RepoProductCost, UserCost, WorkflowCost,
};
use crate::error::{GhstatError, Result};
use crate::types::CostedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A fully assembled usage report
///
/// Field order matches the fixed presentation order: the summary line, then
/// repositories by total cost, repository products, workflows, storage-only
/// repositories, the per-day average, the monthly estimate, and users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Earliest usage date in the dataset
    pub start_date: NaiveDate,
    /// Latest usage date in the dataset
    pub end_date: NaiveDate,
    /// Whole days between start and end
    pub covered_days: i64,
    /// Top 10 most expensive repositories by total cost
    pub top_repositories: Vec<RepoCost>,
    /// Top 10 most expensive repository products by total cost
    pub top_repository_products: Vec<RepoProductCost>,
    /// Top 10 most expensive workflows by total cost
    pub top_workflows: Vec<WorkflowCost>,
    /// Top 10 most expensive repositories by storage cost
    pub top_storage_repositories: Vec<RepoCost>,
    /// Mean of per-date cost sums, rounded to 2 decimals
    pub average_cost_per_day: f64,
    /// 30 times the daily average, rounded to 2 decimals
    pub estimated_cost_per_month: f64,
    /// Top 10 users by cost
    pub top_users: Vec<UserCost>,
}

impl Report {
    /// Assemble a report from the cost-derived dataset
    ///
    /// # Errors
    ///
    /// Returns [`GhstatError::EmptyReport`] when the dataset has no rows,
    /// since no date range can be computed.
    pub fn build(records: &[CostedRecord]) -> Result<Self> {
        let start_date = records
            .iter()
            .map(CostedRecord::date)
            .min()
            .ok_or(GhstatError::EmptyReport)?;
        let end_date = records
            .iter()
            .map(CostedRecord::date)
            .max()
            .ok_or(GhstatError::EmptyReport)?;

        let average_cost_per_day = aggregation::average_cost_per_day(records);

        let report = Self {
            start_date,
            end_date,
            covered_days: (end_date - start_date).num_days(),
            top_repositories: aggregation::top_repositories_by_cost(records),
            top_repository_products: aggregation::top_repository_products_by_cost(records),
            top_workflows: aggregation::top_workflows_by_cost(records),
            top_storage_repositories: aggregation::top_repositories_by_storage_cost(records),
            average_cost_per_day,
            estimated_cost_per_month: aggregation::estimated_cost_per_month(average_cost_per_day),
            top_users: aggregation::top_users_by_cost(records),
        };

        info!(
            "Assembled report covering {} days over {} records",
            report.covered_days,
            records.len()
        );
        Ok(report)
    }

    /// The report's covered-range summary line
    pub fn summary(&self) -> String {
        format!(
            "This report covers {} days between {} and {}",
            self.covered_days, self.start_date, self.end_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, RepoKey, UsageRecord, Username};

    fn costed(date: &str, total_cost: f64) -> CostedRecord {
        CostedRecord {
            record: UsageRecord {
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                username: Username::new("alice"),
                repository: RepoKey::from_parts("org1", "repoA"),
                product: Product::new("Actions"),
                workflow: None,
                quantity: 1.0,
                unit_price: total_cost,
            },
            total_cost,
        }
    }

    #[test]
    fn test_date_range_and_summary() {
        let records = vec![
            costed("2024-01-01", 10.0),
            costed("2024-01-02", 10.0),
            costed("2024-01-02", 100.0),
        ];
        let report = Report::build(&records).unwrap();

        assert_eq!(report.covered_days, 1);
        assert_eq!(
            report.summary(),
            "This report covers 1 days between 2024-01-01 and 2024-01-02"
        );
    }

    #[test]
    fn test_single_day_covers_zero_days() {
        let report = Report::build(&[costed("2024-03-15", 1.0)]).unwrap();
        assert_eq!(report.covered_days, 0);
        assert_eq!(report.start_date, report.end_date);
    }

    #[test]
    fn test_empty_dataset_is_fatal() {
        let err = Report::build(&[]).unwrap_err();
        assert!(matches!(err, GhstatError::EmptyReport));
    }

    #[test]
    fn test_monthly_estimate_uses_rounded_average() {
        // Day sums 1.0 and 1.007 give a mean of 1.0035, displayed as 1.0;
        // the monthly estimate multiplies the displayed value.
        let records = vec![costed("2024-01-01", 1.0), costed("2024-01-02", 1.007)];
        let report = Report::build(&records).unwrap();
        assert_eq!(report.average_cost_per_day, 1.0);
        assert_eq!(report.estimated_cost_per_month, 30.0);
    }
}
