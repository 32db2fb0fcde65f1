//! Core value types for drill-down choropleth maps over a fixed-width
//! administrative code hierarchy.

pub mod code;
pub mod error;
pub mod record;
pub mod view;

pub use code::{
    ADCODE_LENGTH, COUNTRY_MAP_CODE, MAX_AGGREGATION_DEPTH, RegionCode, RegionPrefix,
    SEGMENT_WIDTH,
};
pub use error::{ModelError, Result};
pub use record::{AggregatedRecord, DataRecord, Dataset};
pub use view::{ColorScale, Interaction, RenderFrame};
