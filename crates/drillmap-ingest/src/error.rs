//! Error types for dataset ingestion.

use std::path::PathBuf;

use drillmap_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading datasets and name tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File starts with a byte-order mark of an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}: convert the file to UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty or has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Required column not found in the header.
    #[error("required column '{column}' not found in {path} (available: {available})")]
    MissingColumn {
        column: String,
        path: PathBuf,
        available: String,
    },

    // === Row Errors ===
    /// A required cell is blank.
    #[error("row {row} of {path}: column '{column}' is empty")]
    MissingValue {
        path: PathBuf,
        row: usize,
        column: String,
    },

    /// A value cell is not a number.
    #[error("row {row} of {path}: '{value}' in column '{column}' is not a number")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// A row failed model validation (bad code, non-finite value).
    #[error("row {row} of {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        row: usize,
        #[source]
        source: ModelError,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
