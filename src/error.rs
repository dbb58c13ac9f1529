//! Error types for ghstat
//!
//! This module defines the error types used throughout the ghstat library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Every ingestion-time error is fatal to the current run: the date range
//! and per-day aggregation need every row, so there is no skip-and-continue
//! mode and no partial report.

use thiserror::Error;

/// Main error type for ghstat operations
#[derive(Error, Debug)]
pub enum GhstatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Low-level CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No usage report was supplied
    #[error("no usage report supplied")]
    MissingInput,

    /// Required column absent from the uploaded table
    #[error("usage report is missing required column {column:?}")]
    MalformedSchema {
        /// Name of the missing column
        column: String,
    },

    /// A row's Date cell could not be parsed
    #[error("row {row}: invalid date {value:?} (expected YYYY-MM-DD)")]
    MalformedDate {
        /// 1-based data row number (excluding the header)
        row: usize,
        /// The offending cell value
        value: String,
    },

    /// Quantity or Price Per Unit was not numeric
    #[error("row {row}: invalid number {value:?} in column {column:?}")]
    MalformedNumeric {
        /// 1-based data row number (excluding the header)
        row: usize,
        /// Column the value came from
        column: String,
        /// The offending cell value
        value: String,
    },

    /// Negative quantity or price rejected by policy
    #[error("row {row}: negative quantity or unit price rejected by policy")]
    NegativeValue {
        /// 1-based data row number (excluding the header)
        row: usize,
    },

    /// The report contained no data rows, so no date range exists
    #[error("usage report contains no data rows")]
    EmptyReport,
}

/// Convenience type alias for Results in ghstat
///
/// # Example
///
/// ```
/// use ghstat::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, GhstatError>;
