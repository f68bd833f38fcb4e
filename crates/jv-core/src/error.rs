//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own enums.

use thiserror::Error;

use crate::{AgentId, Frame};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("duplicate {frame} for {agent} (record #{index})")]
    DuplicateFrame {
        agent: AgentId,
        frame: Frame,
        /// Input position of the later of the two records.
        index: usize,
    },

    #[error("invalid frame rate {0}: must be a finite positive number")]
    InvalidFrameRate(f64),

    #[error("cannot infer frame rate: {0}")]
    FrameRateInference(String),
}

/// Shorthand result type for `jv-core`.
pub type CoreResult<T> = Result<T, CoreError>;
