//! Error types for jv-output.

use std::path::PathBuf;

use thiserror::Error;

use jv_core::CoreError;
use jv_geometry::GeometryError;

/// Errors that can occur when writing or reading a trajectory database.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output {} already exists and overwriting is disabled", .0.display())]
    PathConflict(PathBuf),

    #[error("output path {} has no file name", .0.display())]
    InvalidDestination(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot move finished database to {}: {source}", path.display())]
    Persist {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("unsupported database version {0:?}")]
    UnsupportedVersion(String),

    #[error("malformed database: {0}")]
    Corrupt(String),

    #[error("stored geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("stored trajectory: {0}")]
    Core(#[from] CoreError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
