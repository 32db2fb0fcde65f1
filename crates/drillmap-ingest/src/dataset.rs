//! Dataset loading.

use std::path::Path;

use drillmap_model::{DataRecord, Dataset, RegionCode};

use crate::csv::{find_column, read_text_table, text_cells};
use crate::error::{IngestError, Result};

/// Column names of a dataset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetColumns {
    pub code: String,
    pub value: String,
}

impl Default for DatasetColumns {
    fn default() -> Self {
        Self {
            code: "adcode".to_string(),
            value: "value".to_string(),
        }
    }
}

impl DatasetColumns {
    #[must_use]
    pub fn with_code(mut self, column: impl Into<String>) -> Self {
        self.code = column.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, column: impl Into<String>) -> Self {
        self.value = column.into();
        self
    }
}

/// Read a dataset of leaf records from a CSV file.
///
/// Every row must carry a valid 6-digit code and a finite number. The first
/// malformed row fails the load; row numbers are 1-based and count data rows
/// only.
pub fn read_dataset(path: &Path, columns: &DatasetColumns) -> Result<Dataset> {
    let df = read_text_table(path)?;
    let code_column = find_column(&df, &columns.code, path)?;
    let value_column = find_column(&df, &columns.value, path)?;

    let codes = text_cells(&df, &code_column)?;
    let values = text_cells(&df, &value_column)?;

    let mut records = Vec::with_capacity(codes.len());
    for (index, (code, value)) in codes.into_iter().zip(values).enumerate() {
        let row = index + 1;
        let code = code.ok_or_else(|| IngestError::MissingValue {
            path: path.to_path_buf(),
            row,
            column: code_column.clone(),
        })?;
        let value = value.ok_or_else(|| IngestError::MissingValue {
            path: path.to_path_buf(),
            row,
            column: value_column.clone(),
        })?;
        let amount: f64 = value.parse().map_err(|_| IngestError::InvalidValue {
            path: path.to_path_buf(),
            row,
            column: value_column.clone(),
            value: value.clone(),
        })?;

        let record = RegionCode::new(code)
            .and_then(|code| DataRecord::new(code, amount))
            .map_err(|source| IngestError::InvalidRecord {
                path: path.to_path_buf(),
                row,
                source,
            })?;
        records.push(record);
    }

    if records.is_empty() {
        tracing::warn!(path = %path.display(), "dataset has no rows");
    }
    let dataset = Dataset::new(records);
    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        total = dataset.total(),
        "loaded dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_custom_columns() {
        let file = create_temp_csv("code,population\n110101,10\n110102,2.5\n");
        let columns = DatasetColumns::default()
            .with_code("code")
            .with_value("Population");
        let dataset = read_dataset(file.path(), &columns).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.total(), 12.5);
    }

    #[test]
    fn test_non_numeric_value() {
        let file = create_temp_csv("adcode,value\n110101,10\n110102,many\n");
        let err = read_dataset(file.path(), &DatasetColumns::default()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::InvalidValue { row: 2, ref value, .. } if value == "many"
        ));
    }

    #[test]
    fn test_non_finite_value() {
        let file = create_temp_csv("adcode,value\n110101,NaN\n");
        let err = read_dataset(file.path(), &DatasetColumns::default()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn test_short_code() {
        let file = create_temp_csv("adcode,value\n11010,1\n");
        let err = read_dataset(file.path(), &DatasetColumns::default()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn test_blank_value() {
        let file = create_temp_csv("adcode,value\n110101,\n");
        let err = read_dataset(file.path(), &DatasetColumns::default()).unwrap_err();
        assert!(matches!(err, IngestError::MissingValue { row: 1, .. }));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let file = create_temp_csv("adcode,value\n");
        let dataset = read_dataset(file.path(), &DatasetColumns::default()).unwrap();
        assert!(dataset.is_empty());
    }
}
