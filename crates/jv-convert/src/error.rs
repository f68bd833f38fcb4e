use std::path::PathBuf;

use jv_core::CoreError;
use jv_geometry::GeometryError;
use jv_output::OutputError;
use jv_txt::TxtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Txt(#[from] TxtError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("a single output path was given but the pattern matched {matched} files")]
    MultipleFilesSingleOutput { matched: usize },

    #[error("invalid file pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("{}: {source}", path.display())]
    File {
        path:   PathBuf,
        #[source]
        source: Box<ConvertError>,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;
