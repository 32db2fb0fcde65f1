//! Shapes exchanged with the rendering layer.

use serde::{Deserialize, Serialize};

use crate::code::{RegionCode, RegionPrefix};
use crate::record::AggregatedRecord;

/// Domain of the continuous color scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Scale used when there is nothing to color.
    pub const EMPTY: Self = Self { min: 0.0, max: 0.0 };

    /// Derive the scale domain from the values shown on the map.
    ///
    /// A single value is anchored at zero so the scale is never a single
    /// point.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            count += 1;
            min = min.min(value);
            max = max.max(value);
        }
        match count {
            0 => Self::EMPTY,
            1 => Self { min: 0.0, max },
            _ => Self { min, max },
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Everything the renderer needs to draw one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    /// Boundary geometry to draw under the records.
    pub map_code: RegionCode,
    /// Label of the map series (the metric being shown).
    pub series_name: String,
    pub records: Vec<AggregatedRecord>,
    pub color_scale_min: f64,
    pub color_scale_max: f64,
    /// True while a transition is waiting on its geometry.
    pub loading: bool,
}

impl RenderFrame {
    pub fn color_scale(&self) -> ColorScale {
        ColorScale {
            min: self.color_scale_min,
            max: self.color_scale_max,
        }
    }
}

/// A user interaction raised by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// A drawn region was activated. `prefix` is `None` when the region has no
    /// data entry behind it.
    RegionClicked { prefix: Option<RegionPrefix> },
    /// Empty space outside every region was activated.
    EmptySpaceClicked,
}
