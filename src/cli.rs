//! CLI interface for ghstat
//!
//! This module defines the command-line interface using clap. The tool takes
//! a single usage-report CSV and prints the assembled report; there are no
//! subcommands.
//!
//! # Example
//!
//! ```bash
//! # Human-readable tables
//! ghstat usage-report.csv
//!
//! # Machine-readable output
//! ghstat usage-report.csv --json
//!
//! # Fail on credit/refund rows instead of letting them subtract
//! ghstat usage-report.csv --negatives reject
//! ```

use crate::cost::NegativePolicy;
use clap::Parser;
use std::path::PathBuf;

/// Analyze a GitHub Actions usage report CSV export
///
/// To get your usage report, go to Settings > Billing and plans > Plans and
/// usage > Get usage report (account or organisation). GitHub emails you when
/// the export is ready.
#[derive(Parser, Debug, Clone)]
#[command(name = "ghstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the usage report CSV; when omitted, no report is produced
    pub report: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// How to treat negative quantities or unit prices (credits/refunds)
    #[arg(long, value_enum, default_value = "include")]
    pub negatives: NegativePolicy,

    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ghstat", "report.csv"]);
        assert_eq!(cli.report, Some(PathBuf::from("report.csv")));
        assert!(!cli.json);
        assert_eq!(cli.negatives, NegativePolicy::Include);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_report_path_is_optional() {
        let cli = Cli::parse_from(["ghstat"]);
        assert_eq!(cli.report, None);
    }

    #[test]
    fn test_negatives_flag() {
        let cli = Cli::parse_from(["ghstat", "report.csv", "--negatives", "clip"]);
        assert_eq!(cli.negatives, NegativePolicy::Clip);
    }
}
