//! Ingestion and normalization of usage-report CSV exports
//!
//! This module turns the raw tabular export into typed [`UsageRecord`]s:
//! dates are parsed, the `Owner` and `Repository Slug` columns are joined
//! into the canonical repository key, and the numeric columns are validated.
//! Columns are resolved by header name, so extra columns and reordering in
//! the export are tolerated.
//!
//! Input row order is preserved and no row is ever silently dropped here;
//! filtering only happens inside specific aggregations.
//!
//! # Examples
//!
//! ```
//! use ghstat::ingest::parse_usage_report;
//!
//! let csv = "\
//! Date,Username,Owner,Repository Slug,Product,Actions Workflow,Quantity,Price Per Unit ($)
//! 2024-01-01,octocat,octo-org,hello-world,Actions,.github/workflows/ci.yml,10,0.008
//! ";
//! let records = parse_usage_report(csv.as_bytes()).unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].repository.as_str(), "octo-org/hello-world");
//! ```

use crate::error::{GhstatError, Result};
use crate::types::{Product, RepoKey, UsageRecord, Username};
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Required columns, in the order GitHub emits them
const COL_DATE: &str = "Date";
const COL_USERNAME: &str = "Username";
const COL_OWNER: &str = "Owner";
const COL_SLUG: &str = "Repository Slug";
const COL_PRODUCT: &str = "Product";
const COL_WORKFLOW: &str = "Actions Workflow";
const COL_QUANTITY: &str = "Quantity";
const COL_UNIT_PRICE: &str = "Price Per Unit ($)";

/// Resolved positions of the required columns within the header row
struct ColumnIndex {
    date: usize,
    username: usize,
    owner: usize,
    slug: usize,
    product: usize,
    workflow: usize,
    quantity: usize,
    unit_price: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| GhstatError::MalformedSchema {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            date: find(COL_DATE)?,
            username: find(COL_USERNAME)?,
            owner: find(COL_OWNER)?,
            slug: find(COL_SLUG)?,
            product: find(COL_PRODUCT)?,
            workflow: find(COL_WORKFLOW)?,
            quantity: find(COL_QUANTITY)?,
            unit_price: find(COL_UNIT_PRICE)?,
        })
    }
}

/// Read and normalize a usage report from a file on disk
pub fn read_usage_report(path: &Path) -> Result<Vec<UsageRecord>> {
    debug!("Reading usage report from {}", path.display());
    let file = File::open(path)?;
    parse_usage_report(BufReader::new(file))
}

/// Parse a usage report from any reader
///
/// The header row is required and validated up front; a missing required
/// column fails with [`GhstatError::MalformedSchema`] before any row is
/// parsed. Each subsequent row yields exactly one [`UsageRecord`].
pub fn parse_usage_report<R: Read>(reader: R) -> Result<Vec<UsageRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        records.push(parse_row(&columns, &row, idx + 1)?);
    }

    debug!("Normalized {} usage records", records.len());
    Ok(records)
}

fn parse_row(columns: &ColumnIndex, row: &csv::StringRecord, row_num: usize) -> Result<UsageRecord> {
    let cell = |idx: usize| row.get(idx).unwrap_or_default();

    let date_str = cell(columns.date);
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        GhstatError::MalformedDate {
            row: row_num,
            value: date_str.to_string(),
        }
    })?;

    let quantity = parse_number(cell(columns.quantity), COL_QUANTITY, row_num)?;
    let unit_price = parse_number(cell(columns.unit_price), COL_UNIT_PRICE, row_num)?;

    // GitHub exports leave the workflow cell empty for non-Actions rows;
    // older exports write the literal string "null" instead.
    let workflow = match cell(columns.workflow) {
        "" | "null" => None,
        path => Some(path.to_string()),
    };

    Ok(UsageRecord {
        date,
        username: Username::new(cell(columns.username)),
        repository: RepoKey::from_parts(cell(columns.owner), cell(columns.slug)),
        product: Product::new(cell(columns.product)),
        workflow,
        quantity,
        unit_price,
    })
}

fn parse_number(value: &str, column: &str, row_num: usize) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| GhstatError::MalformedNumeric {
            row: row_num,
            column: column.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Date,Username,Owner,Repository Slug,Product,Actions Workflow,Quantity,Price Per Unit ($)";

    fn parse(rows: &str) -> Result<Vec<UsageRecord>> {
        parse_usage_report(format!("{HEADER}\n{rows}").as_bytes())
    }

    #[test]
    fn test_parses_rows_in_order() {
        let records = parse(
            "2024-01-01,alice,org1,repoA,Actions,path/to/wfA.yml,10,1.00\n\
             2024-01-02,bob,org1,repoA,Shared Storage,,5,2.00",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].username.as_str(), "alice");
        assert_eq!(records[0].repository.as_str(), "org1/repoA");
        assert_eq!(records[0].workflow.as_deref(), Some("path/to/wfA.yml"));
        assert_eq!(records[1].workflow, None);
        assert_eq!(records[1].quantity, 5.0);
        assert_eq!(records[1].unit_price, 2.0);
    }

    #[test]
    fn test_null_workflow_is_sentinel() {
        let records = parse("2024-01-01,alice,org1,repoA,Shared Storage,null,1,0.25").unwrap();
        assert_eq!(records[0].workflow, None);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let csv = "Date,Username,Owner,Repository Slug,Product,Actions Workflow,Quantity\n\
                   2024-01-01,alice,org1,repoA,Actions,wf.yml,10";
        let err = parse_usage_report(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, GhstatError::MalformedSchema { ref column } if column == "Price Per Unit ($)")
        );
    }

    #[test]
    fn test_reordered_columns_are_accepted() {
        let csv = "Username,Date,Product,Owner,Repository Slug,Actions Workflow,Price Per Unit ($),Quantity\n\
                   alice,2024-01-01,Actions,org1,repoA,wf.yml,0.008,25";
        let records = parse_usage_report(csv.as_bytes()).unwrap();
        assert_eq!(records[0].quantity, 25.0);
        assert_eq!(records[0].unit_price, 0.008);
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let err = parse("01/02/2024,alice,org1,repoA,Actions,wf.yml,10,1.00").unwrap_err();
        assert!(matches!(
            err,
            GhstatError::MalformedDate { row: 1, ref value } if value == "01/02/2024"
        ));
    }

    #[test]
    fn test_bad_number_is_fatal() {
        let err = parse("2024-01-01,alice,org1,repoA,Actions,wf.yml,ten,1.00").unwrap_err();
        assert!(matches!(
            err,
            GhstatError::MalformedNumeric { row: 1, ref column, .. } if column == "Quantity"
        ));
    }

    #[test]
    fn test_header_only_input_yields_no_records() {
        let records = parse_usage_report(format!("{HEADER}\n").as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
