//! Output formatting module for ghstat
//!
//! This module provides formatters for displaying an assembled report in
//! different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! The formatter is an explicit per-run choice passed in from the CLI, not
//! process-wide state. The rendering surface is a one-way sink: formatters
//! return a string, the caller prints it, and nothing is signalled back.
//!
//! # Examples
//!
//! ```no_run
//! use ghstat::cost::{derive_costs, NegativePolicy};
//! use ghstat::output::get_formatter;
//! use ghstat::report::Report;
//!
//! # fn example(records: Vec<ghstat::types::UsageRecord>) -> ghstat::Result<()> {
//! let costed = derive_costs(records, NegativePolicy::Include)?;
//! let report = Report::build(&costed)?;
//!
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_report(&report));
//! # Ok(())
//! # }
//! ```

use crate::report::Report;
use prettytable::{Table, format, row};
use serde_json::json;

/// Trait for report formatters
pub trait OutputFormatter {
    /// Format the full report: summary line plus all seven views
    fn format_report(&self, report: &Report) -> String;
}

/// Get the appropriate formatter based on output preferences
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables suitable for terminal display, each preceded by its
/// section heading, in the report's fixed order. Costs are shown with dollar
/// signs.
pub struct TableFormatter;

impl TableFormatter {
    /// Format currency with dollar sign
    fn format_currency(amount: f64) -> String {
        format!("${amount:.2}")
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }

    fn push_section(output: &mut String, heading: &str, table: Table) {
        output.push_str(&format!("\n### {heading}\n"));
        output.push_str(&table.to_string());
    }
}

impl OutputFormatter for TableFormatter {
    fn format_report(&self, report: &Report) -> String {
        let mut output = String::new();
        output.push_str(&report.summary());
        output.push('\n');

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Repository", b -> "Total Cost Per Repository ($)"]);
        for entry in &report.top_repositories {
            table.add_row(row![
                entry.repository,
                r -> Self::format_currency(entry.total_cost)
            ]);
        }
        Self::push_section(
            &mut output,
            "Top 10 most expensive repositories by total cost",
            table,
        );

        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Product",
            b -> "Repository",
            b -> "Total Cost Per Product ($)"
        ]);
        for entry in &report.top_repository_products {
            table.add_row(row![
                entry.product,
                entry.repository,
                r -> Self::format_currency(entry.total_cost)
            ]);
        }
        Self::push_section(
            &mut output,
            "Top 10 most expensive repository products by total cost",
            table,
        );

        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Workflow",
            b -> "Repository",
            b -> "Total Cost Per Workflow ($)"
        ]);
        for entry in &report.top_workflows {
            table.add_row(row![
                entry.workflow,
                entry.repository,
                r -> Self::format_currency(entry.total_cost)
            ]);
        }
        Self::push_section(
            &mut output,
            "Top 10 most expensive workflows by total cost",
            table,
        );

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Repository", b -> "Total Cost Per Repository ($)"]);
        for entry in &report.top_storage_repositories {
            table.add_row(row![
                entry.repository,
                r -> Self::format_currency(entry.total_cost)
            ]);
        }
        Self::push_section(
            &mut output,
            "Top 10 most expensive repositories by storage cost",
            table,
        );

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Average Cost Per Day ($)"]);
        table.add_row(row![r -> Self::format_currency(report.average_cost_per_day)]);
        Self::push_section(&mut output, "Average cost per day", table);

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Estimated Cost Per Month ($)"]);
        table.add_row(row![r -> Self::format_currency(report.estimated_cost_per_month)]);
        Self::push_section(&mut output, "Estimated cost per month", table);

        let mut table = Self::new_table();
        table.set_titles(row![b -> "Username", b -> "Total Cost Per User ($)"]);
        for entry in &report.top_users {
            table.add_row(row![
                entry.username,
                r -> Self::format_currency(entry.total_cost)
            ]);
        }
        Self::push_section(&mut output, "Top 10 users by cost", table);

        output
    }
}

/// JSON formatter for machine-readable output
///
/// Produces structured JSON that can be parsed by other tools or used in
/// automation pipelines.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> String {
        let output = json!({
            "summary": {
                "start_date": report.start_date.format("%Y-%m-%d").to_string(),
                "end_date": report.end_date.format("%Y-%m-%d").to_string(),
                "covered_days": report.covered_days,
            },
            "top_repositories": report.top_repositories.iter().map(|r| json!({
                "repository": r.repository.as_str(),
                "total_cost": r.total_cost,
            })).collect::<Vec<_>>(),
            "top_repository_products": report.top_repository_products.iter().map(|r| json!({
                "product": r.product.as_str(),
                "repository": r.repository.as_str(),
                "total_cost": r.total_cost,
            })).collect::<Vec<_>>(),
            "top_workflows": report.top_workflows.iter().map(|w| json!({
                "workflow": w.workflow,
                "repository": w.repository.as_str(),
                "total_cost": w.total_cost,
            })).collect::<Vec<_>>(),
            "top_storage_repositories": report.top_storage_repositories.iter().map(|r| json!({
                "repository": r.repository.as_str(),
                "total_cost": r.total_cost,
            })).collect::<Vec<_>>(),
            "average_cost_per_day": report.average_cost_per_day,
            "estimated_cost_per_month": report.estimated_cost_per_month,
            "top_users": report.top_users.iter().map(|u| json!({
                "username": u.username.as_str(),
                "total_cost": u.total_cost,
            })).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&output).unwrap_or_default()
    }
}
