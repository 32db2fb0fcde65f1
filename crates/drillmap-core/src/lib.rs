//! Hierarchical aggregation and navigation engine for drill-down choropleth
//! maps.
//!
//! # Overview
//!
//! - **adcode**: prefix extraction, padding and map-code derivation
//! - **inference**: the most specific scope shared by a dataset
//! - **aggregate**: per-scope grouping and summation of leaf records
//! - **navigation**: the drill-down / drill-up state machine
//! - **render**: conversion into renderer frames
//! - **names** / **geometry**: seams for region names and boundary geometry
//!
//! # Example
//!
//! ```ignore
//! use drillmap_core::{FsGeometryLoader, Navigator, NavigatorOptions, NoNames};
//!
//! let navigator = Navigator::new(dataset, NoNames, FsGeometryLoader::new("maps"), NavigatorOptions::new());
//! navigator.start().await?;
//! navigator.handle(&Interaction::EmptySpaceClicked).await?;
//! ```

pub mod adcode;
pub mod aggregate;
pub mod error;
pub mod geometry;
pub mod inference;
pub mod names;
pub mod navigation;
pub mod render;

pub use adcode::{MAX_GEOMETRY_PREFIX_LEN, depth_of, derive_map_code, prefix_of_length};
pub use aggregate::{aggregate, color_scale, total};
pub use error::{NavigationError, Result};
pub use geometry::{
    CachingLoader, FsGeometryLoader, Geometry, GeometryError, GeometryLoader, parse_geometry,
};
pub use inference::infer_common_prefix;
pub use names::{NoNames, RegionNameResolver, RegionNameTable};
pub use navigation::{Navigator, NavigatorOptions, Scope, Transition};
pub use render::{MapView, build_frame};
