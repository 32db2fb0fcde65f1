//! Error types for navigation.

use thiserror::Error;

use crate::geometry::GeometryError;

/// A transition that could not be applied. The committed scope is unchanged.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("failed to load geometry for map {map_code}")]
    Geometry {
        map_code: String,
        #[source]
        source: GeometryError,
    },
}

/// Result type for navigation operations.
pub type Result<T> = std::result::Result<T, NavigationError>;
