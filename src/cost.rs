//! Cost derivation
//!
//! A pure, eager pass that augments every [`UsageRecord`] with its derived
//! `total_cost = quantity * unit_price`. The derivation runs exactly once
//! per dataset; every downstream aggregation reuses the same value so no two
//! reports can disagree on rounding or operand order. No rounding happens
//! here — full precision is preserved through every summation and only the
//! final display values are rounded.

use crate::error::{GhstatError, Result};
use crate::types::{CostedRecord, UsageRecord};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How to treat negative quantities or unit prices (credits/refunds)
///
/// The billing export does not document negative values, so the choice is
/// surfaced as an explicit per-run policy rather than guessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NegativePolicy {
    /// Let the arithmetic follow the sign: credits subtract from totals
    #[default]
    Include,
    /// Clamp negative derived costs to zero
    Clip,
    /// Fail the run on any negative quantity or unit price
    Reject,
}

/// Derive the total cost for every record
///
/// # Errors
///
/// Returns [`GhstatError::NegativeValue`] under [`NegativePolicy::Reject`]
/// when a row carries a negative quantity or unit price.
pub fn derive_costs(
    records: Vec<UsageRecord>,
    policy: NegativePolicy,
) -> Result<Vec<CostedRecord>> {
    let costed = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            if policy == NegativePolicy::Reject
                && (record.quantity < 0.0 || record.unit_price < 0.0)
            {
                return Err(GhstatError::NegativeValue { row: idx + 1 });
            }

            let mut total_cost = record.quantity * record.unit_price;
            if policy == NegativePolicy::Clip && total_cost < 0.0 {
                total_cost = 0.0;
            }

            Ok(CostedRecord { record, total_cost })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Derived costs for {} records", costed.len());
    Ok(costed)
}
