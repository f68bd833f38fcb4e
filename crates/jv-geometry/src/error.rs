//! Geometry error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("inline geometry and geometry file are mutually exclusive")]
    ConflictingGeometry,

    #[error("invalid WKT polygon: {reason}")]
    Parse { reason: String },

    #[error("cannot read geometry file {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot infer a walkable area: trajectory has no positions")]
    NoPositions,
}

impl GeometryError {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        GeometryError::Parse { reason: reason.into() }
    }
}

pub type GeometryResult<T> = Result<T, GeometryError>;
