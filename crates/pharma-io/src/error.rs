//! Error types for the CSV exchange boundary.
//!
//! Whole-file failures (missing file, unreadable CSV, database down)
//! surface as [`IoError`]. Per-row problems never reach this type: they
//! are logged and counted by the importer, and the file keeps going.

use thiserror::Error;

use pharma_db::DbError;

/// File exchange errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// CSV-level failure (malformed file, write failure).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database failure while importing or exporting.
    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type for file exchange operations.
pub type IoResult<T> = Result<T, IoError>;

/// Why a single row was skipped during import.
///
/// Carried in the importer's log output; never aborts the file.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid amount '{value}' in field '{field}'")]
    InvalidAmount { field: &'static str, value: String },

    #[error("invalid integer '{value}' in field '{field}'")]
    InvalidInteger { field: &'static str, value: String },

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid period type '{0}' (expected day, month or year)")]
    InvalidPeriodType(String),
}
