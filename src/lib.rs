//! ghstat - Analyze GitHub Actions usage reports from billing CSV exports
//!
//! This library provides functionality to:
//! - Parse a GitHub billing usage-report CSV into typed, validated records
//! - Derive the per-row total cost (quantity times unit price)
//! - Rank repositories, products, workflows, and users by spend
//! - Summarize costs over the covered date range in table and JSON formats
//!
//! # Examples
//!
//! ```no_run
//! use ghstat::{
//!     cost::{derive_costs, NegativePolicy},
//!     ingest::read_usage_report,
//!     output::get_formatter,
//!     report::Report,
//! };
//! use std::path::Path;
//!
//! fn main() -> ghstat::Result<()> {
//!     let records = read_usage_report(Path::new("usage-report.csv"))?;
//!     let costed = derive_costs(records, NegativePolicy::Include)?;
//!     let report = Report::build(&costed)?;
//!
//!     let formatter = get_formatter(false);
//!     println!("{}", formatter.format_report(&report));
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod cost;
pub mod error;
pub mod ingest;
pub mod output;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{GhstatError, Result};
pub use types::{CostedRecord, Product, RepoKey, UsageRecord, Username};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
