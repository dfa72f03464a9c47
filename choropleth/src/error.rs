//! Error type shared by the loader, the joiner and the renderer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    /// Reading an input file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The boundary document is not valid GeoJSON.
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The boundary document parsed but holds a bare geometry.
    #[error("expected a FeatureCollection or Feature, found a bare geometry")]
    NotFeatureCollection,

    /// A feature has no string property under the configured name key.
    #[error("feature #{ordinal} has no string property '{field}'")]
    MissingName { ordinal: usize, field: String },

    /// Only Polygon and MultiPolygon regions can be filled.
    #[error("region '{name}' has unsupported geometry type {kind}")]
    UnsupportedGeometry { name: String, kind: &'static str },

    /// An ingestion cap was hit.
    #[error("{what} exceeds limit of {limit}")]
    LimitExceeded { what: &'static str, limit: usize },

    /// The index override file could not be parsed.
    #[error("invalid index table: {0}")]
    IndexParse(#[from] serde_json::Error),

    /// Strict join found boundaries without an index record.
    #[error("{} region(s) have no index value: {}", .0.len(), .0.join(", "))]
    UnmatchedRegions(Vec<String>),
}

impl MapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MapError::Io {
            path: path.into(),
            source,
        }
    }
}
