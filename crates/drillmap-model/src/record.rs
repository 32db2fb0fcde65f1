//! Leaf observations and the aggregated entries shown on the map.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::code::{RegionCode, RegionPrefix};
use crate::error::{ModelError, Result};

/// One leaf observation supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub code: RegionCode,
    pub value: f64,
}

impl DataRecord {
    /// Build a record, rejecting `NaN` and infinite values.
    pub fn new(code: RegionCode, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(ModelError::NonFiniteValue {
                code: code.to_string(),
                value,
            });
        }
        Ok(Self { code, value })
    }
}

/// The full, immutable set of leaf records.
///
/// Cloning is cheap; every scope change re-aggregates from this set.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[DataRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<DataRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose code lies inside `prefix`.
    pub fn within<'a>(&'a self, prefix: &'a RegionPrefix) -> impl Iterator<Item = &'a DataRecord> {
        self.records.iter().filter(move |r| prefix.matches(&r.code))
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.records.iter().map(|r| r.value).sum()
    }
}

impl FromIterator<DataRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataRecord;
    type IntoIter = std::slice::Iter<'a, DataRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One map entry at the current scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    /// Group key (a prefix padded with zeros) or the leaf code itself.
    pub code: RegionCode,
    /// Prefix a click on this entry drills into.
    pub prefix: RegionPrefix,
    pub name: String,
    pub value: f64,
}
