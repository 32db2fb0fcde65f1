//! Inference of the most specific scope shared by a whole dataset.

use drillmap_model::{ADCODE_LENGTH, Dataset, RegionPrefix, SEGMENT_WIDTH};
use tracing::debug;

/// Longest prefix shared by every record in `dataset`.
///
/// Checks full codes first, then drops one administrative level at a time.
/// An empty dataset, or one with no shared province, yields the country
/// prefix.
pub fn infer_common_prefix(dataset: &Dataset) -> RegionPrefix {
    let Some(first) = dataset.iter().next() else {
        debug!("empty dataset, using country scope");
        return RegionPrefix::country();
    };

    let mut len = ADCODE_LENGTH;
    while len > 0 {
        let head = &first.code.as_str()[..len];
        let uniform = dataset
            .iter()
            .all(|record| &record.code.as_str()[..len] == head);
        if uniform {
            let prefix = first.code.truncated(len);
            debug!(prefix = %prefix, records = dataset.len(), "inferred common prefix");
            return prefix;
        }
        len -= SEGMENT_WIDTH;
    }

    debug!(records = dataset.len(), "no shared prefix, using country scope");
    RegionPrefix::country()
}
