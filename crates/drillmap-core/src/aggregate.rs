//! Aggregation of leaf records into the entries shown at a scope.

use std::collections::BTreeMap;

use drillmap_model::{
    AggregatedRecord, ColorScale, Dataset, MAX_AGGREGATION_DEPTH, RegionCode, RegionPrefix,
};
use tracing::debug;

use crate::adcode::prefix_of_length;
use crate::names::RegionNameResolver;

/// Build the map entries one level below `prefix`.
///
/// Records outside `prefix` are ignored. While the child level is province or
/// city, records are grouped by their child prefix (padded to a full code) and
/// summed. Below that every record is passed through unchanged, one entry per
/// record. Each entry's `prefix` is the scope a click on it drills into.
///
/// Entries come back sorted by code; callers should not depend on that.
pub fn aggregate<N>(prefix: &RegionPrefix, dataset: &Dataset, names: &N) -> Vec<AggregatedRecord>
where
    N: RegionNameResolver + ?Sized,
{
    let child_len = prefix.child_len();
    let entries: Vec<(RegionCode, f64)> = if child_len <= MAX_AGGREGATION_DEPTH {
        let mut groups: BTreeMap<RegionCode, f64> = BTreeMap::new();
        for record in dataset.within(prefix) {
            *groups
                .entry(prefix_of_length(&record.code, child_len))
                .or_insert(0.0) += record.value;
        }
        groups.into_iter().collect()
    } else {
        let mut leaves: Vec<(RegionCode, f64)> = dataset
            .within(prefix)
            .map(|record| (record.code.clone(), record.value))
            .collect();
        leaves.sort_by(|a, b| a.0.cmp(&b.0));
        leaves
    };

    debug!(
        prefix = %prefix,
        child_len,
        entries = entries.len(),
        grouped = child_len <= MAX_AGGREGATION_DEPTH,
        "aggregated scope"
    );

    entries
        .into_iter()
        .map(|(code, value)| AggregatedRecord {
            name: names.lookup_name(&code),
            prefix: code.truncated(child_len),
            code,
            value,
        })
        .collect()
}

/// Sum of the values of `records`.
pub fn total(records: &[AggregatedRecord]) -> f64 {
    records.iter().map(|r| r.value).sum()
}

/// Color scale domain for `records`.
pub fn color_scale(records: &[AggregatedRecord]) -> ColorScale {
    ColorScale::from_values(records.iter().map(|r| r.value))
}
