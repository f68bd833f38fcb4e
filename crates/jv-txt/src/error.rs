use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxtError {
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path:   PathBuf,
        /// 1-based line number in the source file.
        line:   usize,
        reason: String,
    },

    #[error("{}: file contains no trajectory records", path.display())]
    EmptyTrajectory { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type TxtResult<T> = Result<T, TxtError>;
