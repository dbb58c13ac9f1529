//! Aggregation module for summarizing usage data
//!
//! Seven independent reducers, each consuming the cost-derived dataset and
//! producing a ranked or summarized view. Every Top-10 report shares one
//! shape: group by key, sum `total_cost` within the group, sort descending
//! by the summed cost, take the first ten, and round the displayed sum to
//! two decimal places.
//!
//! # Tie-breaking
//!
//! Equal sums rank by input order of first appearance. This is deliberate
//! and observable, not incidental: groups are accumulated in first-seen
//! order and the descending sort is stable, so reruns over the same export
//! produce byte-identical tables. A sorted map would instead re-order ties
//! by key.
//!
//! # Rounding
//!
//! Rounding is applied only to final display values, half away from zero,
//! uniformly across all reports. Intermediate per-record costs and group
//! sums keep full precision.

use crate::types::{CostedRecord, Product, RepoKey, Username, SHARED_STORAGE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Number of groups shown by each ranked report
pub const TOP_N: usize = 10;

/// Round a cost to two decimal places for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Group-by-sum accumulator that preserves first-appearance order
///
/// Backing for every ranked report. `HashMap` gives O(1) key lookup while
/// the entry vector keeps the insertion order that the stable sort later
/// uses to break ties.
struct GroupSums<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, f64)>,
}

impl<K: Clone + Eq + Hash> GroupSums<K> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn add(&mut self, key: K, cost: f64) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += cost,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, cost));
            }
        }
    }

    /// Sort descending by sum (stable), truncate, round for display
    fn into_top(mut self, n: usize) -> Vec<(K, f64)> {
        self.entries
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        self.entries.truncate(n);
        for entry in &mut self.entries {
            entry.1 = round2(entry.1);
        }
        self.entries
    }
}

/// Summed cost for one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoCost {
    /// Canonical `owner/slug` repository key
    pub repository: RepoKey,
    /// Summed cost for the group, rounded to 2 decimals
    pub total_cost: f64,
}

/// Summed cost for one (product, repository) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoProductCost {
    /// Billed product label
    pub product: Product,
    /// Canonical `owner/slug` repository key
    pub repository: RepoKey,
    /// Summed cost for the group, rounded to 2 decimals
    pub total_cost: f64,
}

/// Summed cost for one (workflow, repository) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowCost {
    /// Workflow file name (last segment of the workflow path)
    pub workflow: String,
    /// Canonical `owner/slug` repository key
    pub repository: RepoKey,
    /// Summed cost for the group, rounded to 2 decimals
    pub total_cost: f64,
}

/// Summed cost for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCost {
    /// Attribution identity
    pub username: Username,
    /// Summed cost for the group, rounded to 2 decimals
    pub total_cost: f64,
}

/// Top 10 most expensive repositories by total cost
pub fn top_repositories_by_cost(records: &[CostedRecord]) -> Vec<RepoCost> {
    let mut groups = GroupSums::new();
    for costed in records {
        groups.add(costed.record.repository.clone(), costed.total_cost);
    }
    groups
        .into_top(TOP_N)
        .into_iter()
        .map(|(repository, total_cost)| RepoCost {
            repository,
            total_cost,
        })
        .collect()
}

/// Top 10 most expensive (product, repository) pairs by total cost
pub fn top_repository_products_by_cost(records: &[CostedRecord]) -> Vec<RepoProductCost> {
    let mut groups = GroupSums::new();
    for costed in records {
        groups.add(
            (
                costed.record.product.clone(),
                costed.record.repository.clone(),
            ),
            costed.total_cost,
        );
    }
    groups
        .into_top(TOP_N)
        .into_iter()
        .map(|((product, repository), total_cost)| RepoProductCost {
            product,
            repository,
            total_cost,
        })
        .collect()
}

/// Top 10 most expensive workflows by total cost
///
/// Records without a workflow path contribute to every other report but are
/// excluded from this one.
pub fn top_workflows_by_cost(records: &[CostedRecord]) -> Vec<WorkflowCost> {
    let mut groups = GroupSums::new();
    for costed in records {
        if let Some(name) = costed.record.workflow_name() {
            groups.add(
                (name.to_string(), costed.record.repository.clone()),
                costed.total_cost,
            );
        }
    }
    groups
        .into_top(TOP_N)
        .into_iter()
        .map(|((workflow, repository), total_cost)| WorkflowCost {
            workflow,
            repository,
            total_cost,
        })
        .collect()
}

/// Top 10 most expensive repositories by storage cost
///
/// Only records billed under the "Shared Storage" product are counted.
pub fn top_repositories_by_storage_cost(records: &[CostedRecord]) -> Vec<RepoCost> {
    let mut groups = GroupSums::new();
    for costed in records {
        if costed.record.product.as_str() == SHARED_STORAGE {
            groups.add(costed.record.repository.clone(), costed.total_cost);
        }
    }
    groups
        .into_top(TOP_N)
        .into_iter()
        .map(|(repository, total_cost)| RepoCost {
            repository,
            total_cost,
        })
        .collect()
}

/// Top 10 users by total cost
pub fn top_users_by_cost(records: &[CostedRecord]) -> Vec<UserCost> {
    let mut groups = GroupSums::new();
    for costed in records {
        groups.add(costed.record.username.clone(), costed.total_cost);
    }
    groups
        .into_top(TOP_N)
        .into_iter()
        .map(|(username, total_cost)| UserCost {
            username,
            total_cost,
        })
        .collect()
}

/// Mean, over all dates present, of the per-date cost sums
///
/// Rounded to 2 decimals; 0.0 for an empty dataset.
pub fn average_cost_per_day(records: &[CostedRecord]) -> f64 {
    let mut groups = GroupSums::new();
    for costed in records {
        groups.add(costed.date(), costed.total_cost);
    }
    if groups.entries.is_empty() {
        return 0.0;
    }
    let total: f64 = groups.entries.iter().map(|(_, cost)| cost).sum();
    round2(total / groups.entries.len() as f64)
}

/// Projected monthly cost: 30 times the (already rounded) daily average
pub fn estimated_cost_per_month(average_per_day: f64) -> f64 {
    round2(average_per_day * 30.0)
}

/// Sum of derived costs across the whole dataset, full precision
pub fn dataset_total_cost(records: &[CostedRecord]) -> f64 {
    records.iter().map(|c| c.total_cost).sum()
}
