//! Dataset ingestion for drill-down maps.
//!
//! Loads leaf datasets and region-name tables from CSV files into the model
//! types. Every column is read as text so codes keep their leading zeros, and
//! every row is validated before it reaches the aggregation engine.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use drillmap_ingest::{DatasetColumns, NameColumns, read_dataset, read_region_names};
//!
//! let dataset = read_dataset(Path::new("population.csv"), &DatasetColumns::default())?;
//! let names = read_region_names(Path::new("regions.csv"), &NameColumns::default())?;
//! ```

mod csv;
mod dataset;
mod error;
mod names;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_text_table,
    validate_encoding,
};

// === Loaders ===
pub use dataset::{DatasetColumns, read_dataset};
pub use names::{NameColumns, read_region_names};
