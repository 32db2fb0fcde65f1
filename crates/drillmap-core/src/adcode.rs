//! Operations over fixed-width administrative codes.

use drillmap_model::{RegionCode, RegionPrefix};

/// Longest prefix for which boundary geometry is published (city level).
pub const MAX_GEOMETRY_PREFIX_LEN: usize = 4;

/// First `len` digits of `code`, right-padded with zeros to a full code.
///
/// Used to turn any partial code into a map lookup key.
pub fn prefix_of_length(code: &RegionCode, len: usize) -> RegionCode {
    code.truncated(len).padded()
}

/// Depth of a prefix in digits; 0 is the country level.
pub fn depth_of(prefix: &RegionPrefix) -> usize {
    prefix.len()
}

/// Boundary-geometry identifier for a scope.
///
/// The country scope maps to the reserved country code. County prefixes fall
/// back to their city because county geometry is never published.
pub fn derive_map_code(prefix: &RegionPrefix) -> RegionCode {
    if prefix.is_country() {
        return RegionCode::country();
    }
    prefix.truncated(MAX_GEOMETRY_PREFIX_LEN).padded()
}
