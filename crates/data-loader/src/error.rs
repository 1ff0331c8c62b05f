//! Error types for the data-loader crate.
//!
//! Everything that can go wrong between a catalog file on disk and a
//! validated in-memory `Catalog` ends up as a `DataLoadError`.

use thiserror::Error;

/// Errors that can occur while loading and parsing catalog data
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON catalog file was not a valid array of records
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Line in a `.dat` catalog file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A record field had an invalid value
    #[error("Invalid value for {field} of movie {id}: {value}")]
    InvalidValue { id: u32, field: String, value: String },

    /// Two records claimed the same movie id
    #[error("Duplicate movie id {id}")]
    DuplicateMovie { id: u32 },

    /// The file extension doesn't map to a known catalog format
    #[error("Unsupported catalog format: {path}")]
    UnsupportedFormat { path: String },

    /// Catalog validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
