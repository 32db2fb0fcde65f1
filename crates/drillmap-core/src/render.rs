//! Conversion of engine output into renderer payloads.

use std::sync::Arc;

use drillmap_model::{AggregatedRecord, RegionCode, RenderFrame};

use crate::aggregate::color_scale;
use crate::geometry::Geometry;

/// Build the frame for a committed scope.
pub fn build_frame(
    map_code: RegionCode,
    series_name: &str,
    records: Vec<AggregatedRecord>,
) -> RenderFrame {
    let scale = color_scale(&records);
    RenderFrame {
        map_code,
        series_name: series_name.to_string(),
        records,
        color_scale_min: scale.min,
        color_scale_max: scale.max,
        loading: false,
    }
}

/// What observers of a navigator see: a frame and the geometry it is drawn
/// on. Both always belong to the same scope.
#[derive(Debug, Clone)]
pub struct MapView {
    pub frame: RenderFrame,
    /// `None` until the first transition commits.
    pub geometry: Option<Arc<Geometry>>,
}

impl MapView {
    /// Blank view shown before anything was loaded.
    pub fn placeholder(map_code: RegionCode, series_name: &str) -> Self {
        Self {
            frame: build_frame(map_code, series_name, Vec::new()),
            geometry: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.frame.loading
    }
}
