//! Property-based tests for the cost pipeline

use chrono::NaiveDate;
use ghstat::{
    aggregation::{self, dataset_total_cost},
    cost::{NegativePolicy, derive_costs},
    output::get_formatter,
    report::Report,
    types::{Product, RepoKey, UsageRecord, Username},
};
use proptest::prelude::*;

/// A bounded record generator: few enough users, repos, and workflows that
/// every grouping stays within the Top-10 window, and integer
/// quantities/prices so group sums are exact regardless of summation order.
fn arb_record() -> impl Strategy<Value = UsageRecord> {
    (
        1u32..=28,
        0usize..4,
        0usize..5,
        prop::bool::ANY,
        prop::option::of(0usize..2),
        0u32..1000,
        0u32..50,
    )
        .prop_map(|(day, user, repo, storage, workflow, quantity, price)| UsageRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            username: Username::new(format!("user{user}")),
            repository: RepoKey::from_parts("org", &format!("repo{repo}")),
            product: Product::new(if storage { "Shared Storage" } else { "Actions" }),
            workflow: workflow.map(|w| format!(".github/workflows/wf{w}.yml")),
            quantity: f64::from(quantity),
            unit_price: f64::from(price),
        })
}

proptest! {
    #[test]
    fn derived_cost_is_exactly_quantity_times_price(records in prop::collection::vec(arb_record(), 1..50)) {
        let costed = derive_costs(records.clone(), NegativePolicy::Include).unwrap();
        for (original, costed) in records.iter().zip(&costed) {
            prop_assert_eq!(costed.total_cost, original.quantity * original.unit_price);
        }
    }

    #[test]
    fn group_totals_conserve_dataset_total(records in prop::collection::vec(arb_record(), 1..50)) {
        let costed = derive_costs(records, NegativePolicy::Include).unwrap();
        let total = dataset_total_cost(&costed);

        // At most 5 repositories and 4 users exist, so no grouping is
        // truncated and the displayed sums must conserve the dataset total.
        let by_repo: f64 = aggregation::top_repositories_by_cost(&costed)
            .iter()
            .map(|r| r.total_cost)
            .sum();
        prop_assert_eq!(by_repo, total);

        let by_user: f64 = aggregation::top_users_by_cost(&costed)
            .iter()
            .map(|u| u.total_cost)
            .sum();
        prop_assert_eq!(by_user, total);
    }

    #[test]
    fn storage_and_workflow_filters_partition_consistently(records in prop::collection::vec(arb_record(), 1..50)) {
        let costed = derive_costs(records, NegativePolicy::Include).unwrap();

        let storage_total: f64 = aggregation::top_repositories_by_storage_cost(&costed)
            .iter()
            .map(|r| r.total_cost)
            .sum();
        let expected: f64 = costed
            .iter()
            .filter(|c| c.record.product.as_str() == "Shared Storage")
            .map(|c| c.total_cost)
            .sum();
        prop_assert_eq!(storage_total, expected);

        let workflow_total: f64 = aggregation::top_workflows_by_cost(&costed)
            .iter()
            .map(|w| w.total_cost)
            .sum();
        let expected: f64 = costed
            .iter()
            .filter(|c| c.record.workflow.is_some())
            .map(|c| c.total_cost)
            .sum();
        prop_assert_eq!(workflow_total, expected);
    }

    #[test]
    fn pipeline_is_idempotent(records in prop::collection::vec(arb_record(), 1..50)) {
        let run = |records: Vec<UsageRecord>| {
            let costed = derive_costs(records, NegativePolicy::Include).unwrap();
            let report = Report::build(&costed).unwrap();
            get_formatter(true).format_report(&report)
        };

        prop_assert_eq!(run(records.clone()), run(records));
    }

    #[test]
    fn clip_never_yields_negative_costs(records in prop::collection::vec(arb_record(), 1..50)) {
        // Flip some quantities negative to simulate credits
        let mut records = records;
        for (idx, record) in records.iter_mut().enumerate() {
            if idx % 3 == 0 {
                record.quantity = -record.quantity;
            }
        }

        let costed = derive_costs(records, NegativePolicy::Clip).unwrap();
        prop_assert!(costed.iter().all(|c| c.total_cost >= 0.0));
    }
}
