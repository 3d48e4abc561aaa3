//! Error types for the rolling factor pipeline.

use thiserror::Error;

/// Result type for factor operations.
pub type Result<T> = std::result::Result<T, FactorError>;

/// Errors that can occur while loading prices or computing factors.
///
/// Degenerate numerics (zero variance windows, windows longer than the
/// available history) are not errors: they surface as non-finite or missing
/// values in the output columns.
#[derive(Debug, Error)]
pub enum FactorError {
    /// Missing required column in input data
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Insufficient data for the computation
    #[error("Insufficient data: need {required} rows, got {available}")]
    InsufficientData {
        /// Required number of rows
        required: usize,
        /// Available number of rows
        available: usize,
    },

    /// Table holds a date index but no value columns
    #[error("Table has no value columns")]
    EmptyTable,

    /// Invalid date range
    #[error("Invalid date range: start {start} is not before end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: String,
        /// End date of the range
        end: String,
    },

    /// Rolling window of zero rows
    #[error("Invalid rolling window: {0}")]
    InvalidWindow(usize),

    /// A derived column with the same key or name already exists
    #[error("Column already exists: {0}")]
    DuplicateColumn(String),

    /// Date index is not strictly increasing
    #[error("Dates must be strictly increasing: {current} follows {previous}")]
    UnorderedDates {
        /// Date of the earlier row
        previous: String,
        /// Date of the offending row
        current: String,
    },

    /// Malformed input value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid pipeline configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O failure reading an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
