//! Region-name table loading.

use std::path::Path;

use drillmap_core::RegionNameTable;
use drillmap_model::RegionCode;

use crate::csv::{find_column, read_text_table, text_cells};
use crate::error::{IngestError, Result};

/// Column names of a region-name file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameColumns {
    pub code: String,
    pub name: String,
}

impl Default for NameColumns {
    fn default() -> Self {
        Self {
            code: "adcode".to_string(),
            name: "name".to_string(),
        }
    }
}

/// Read a code to name table.
///
/// Rows with a blank name are skipped. When a code appears more than once the
/// first name is kept and the others are logged.
pub fn read_region_names(path: &Path, columns: &NameColumns) -> Result<RegionNameTable> {
    let df = read_text_table(path)?;
    let code_column = find_column(&df, &columns.code, path)?;
    let name_column = find_column(&df, &columns.name, path)?;

    let codes = text_cells(&df, &code_column)?;
    let names = text_cells(&df, &name_column)?;

    let mut table = RegionNameTable::new();
    let mut duplicates = 0usize;
    for (index, (code, name)) in codes.into_iter().zip(names).enumerate() {
        let row = index + 1;
        let code = code.ok_or_else(|| IngestError::MissingValue {
            path: path.to_path_buf(),
            row,
            column: code_column.clone(),
        })?;
        let code = RegionCode::new(code).map_err(|source| IngestError::InvalidRecord {
            path: path.to_path_buf(),
            row,
            source,
        })?;
        let Some(name) = name else {
            tracing::debug!(row, code = %code, "skipping blank region name");
            continue;
        };
        if !table.insert(code.clone(), name.as_str()) {
            duplicates += 1;
            tracing::warn!(
                row,
                code = %code,
                ignored = %name,
                kept = table.get(&code).unwrap_or_default(),
                "duplicate region name ignored"
            );
        }
    }

    tracing::info!(
        path = %path.display(),
        names = table.len(),
        duplicates,
        "loaded region names"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drillmap_core::RegionNameResolver;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn code(s: &str) -> RegionCode {
        RegionCode::new(s).unwrap()
    }

    #[test]
    fn test_first_name_wins() {
        let file = create_temp_csv("adcode,name\n110000,Beijing\n110000,Peking\n310000,Shanghai\n");
        let table = read_region_names(file.path(), &NameColumns::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup_name(&code("110000")), "Beijing");
    }

    #[test]
    fn test_blank_names_skipped() {
        let file = create_temp_csv("adcode,name\n110000,\n310000,Shanghai\n");
        let table = read_region_names(file.path(), &NameColumns::default()).unwrap();
        assert_eq!(table.get(&code("110000")), None);
        assert_eq!(table.get(&code("310000")), Some("Shanghai"));
    }

    #[test]
    fn test_invalid_code() {
        let file = create_temp_csv("adcode,name\nBJ,Beijing\n");
        let err = read_region_names(file.path(), &NameColumns::default()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidRecord { row: 1, .. }));
    }
}
