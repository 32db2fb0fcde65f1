//! Boundary geometry loading.
//!
//! Geometry is keyed by the map codes produced by
//! [`derive_map_code`](crate::adcode::derive_map_code). The navigator awaits
//! one load per transition and never retries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use drillmap_model::RegionCode;
use geojson::{FeatureCollection, GeoJson};
use thiserror::Error;
use tracing::debug;

/// Polygon collection describing the regions drawn for one map code.
pub type Geometry = FeatureCollection;

/// Errors raised while loading boundary geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("no geometry for map {map_code} at {path}")]
    NotFound { map_code: String, path: PathBuf },

    #[error("failed to read geometry {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse geometry for map {map_code}: {source}")]
    Parse {
        map_code: String,
        #[source]
        source: geojson::Error,
    },

    #[error("geometry for map {map_code} is not a feature collection")]
    NotFeatureCollection { map_code: String },

    #[error("geometry for map {map_code} is unavailable: {message}")]
    Unavailable { map_code: String, message: String },
}

/// Asynchronous source of boundary geometry.
#[async_trait]
pub trait GeometryLoader: Send + Sync {
    async fn load_geometry(&self, map_code: &RegionCode) -> Result<Arc<Geometry>, GeometryError>;
}

#[async_trait]
impl<T: GeometryLoader + ?Sized> GeometryLoader for Arc<T> {
    async fn load_geometry(&self, map_code: &RegionCode) -> Result<Arc<Geometry>, GeometryError> {
        (**self).load_geometry(map_code).await
    }
}

/// Parse a GeoJSON document that must be a feature collection.
pub fn parse_geometry(map_code: &RegionCode, contents: &str) -> Result<Geometry, GeometryError> {
    let parsed = contents
        .parse::<GeoJson>()
        .map_err(|source| GeometryError::Parse {
            map_code: map_code.to_string(),
            source,
        })?;
    match parsed {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(GeometryError::NotFeatureCollection {
            map_code: map_code.to_string(),
        }),
    }
}

/// Reads `<root>/<map_code>_full.json` files.
#[derive(Debug, Clone)]
pub struct FsGeometryLoader {
    root: PathBuf,
}

impl FsGeometryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, map_code: &RegionCode) -> PathBuf {
        self.root.join(format!("{map_code}_full.json"))
    }
}

#[async_trait]
impl GeometryLoader for FsGeometryLoader {
    async fn load_geometry(&self, map_code: &RegionCode) -> Result<Arc<Geometry>, GeometryError> {
        let path = self.path_for(map_code);
        debug!(map_code = %map_code, path = %path.display(), "loading geometry");
        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GeometryError::NotFound {
                    map_code: map_code.to_string(),
                    path: path.clone(),
                }
            } else {
                GeometryError::Read {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;
        let collection = parse_geometry(map_code, &contents)?;
        debug!(
            map_code = %map_code,
            features = collection.features.len(),
            "geometry loaded"
        );
        Ok(Arc::new(collection))
    }
}

/// Remembers every geometry the inner loader produced, keyed by map code.
///
/// Failed loads are not cached.
#[derive(Debug)]
pub struct CachingLoader<L> {
    inner: L,
    cache: Mutex<HashMap<RegionCode, Arc<Geometry>>>,
}

impl<L> CachingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Number of cached map codes.
    pub fn cached(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

#[async_trait]
impl<L: GeometryLoader> GeometryLoader for CachingLoader<L> {
    async fn load_geometry(&self, map_code: &RegionCode) -> Result<Arc<Geometry>, GeometryError> {
        let hit = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(map_code).cloned());
        if let Some(geometry) = hit {
            debug!(map_code = %map_code, "geometry cache hit");
            return Ok(geometry);
        }

        let geometry = self.inner.load_geometry(map_code).await?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(map_code.clone(), Arc::clone(&geometry));
        }
        Ok(geometry)
    }
}
