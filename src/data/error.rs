//! Error types for data operations.
//!
//! Provides unified error handling for all data loading and profiling
//! operations.

use thiserror::Error;

pub use crate::constants::{MAX_INPUT_ROWS, MAX_INPUT_SIZE_MB};

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Polars error (CSV/JSON/IPC readers, frame operations)
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// File is too large for eager loading
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// Too many rows for eager loading
    #[error("Too many rows: {rows} (max {max_rows})")]
    TooManyRows { rows: usize, max_rows: usize },

    /// File is empty
    #[error("Empty file")]
    EmptyFile,

    /// No columns found in data
    #[error("No columns found")]
    NoColumns,

    /// Named column does not exist in the source schema
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Input extension is not one of csv/tsv/json/arrow/ipc/feather
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Generic error message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

impl From<String> for DataError {
    fn from(s: String) -> Self {
        DataError::Other(s)
    }
}

impl From<&str> for DataError {
    fn from(s: &str) -> Self {
        DataError::Other(s.to_string())
    }
}
