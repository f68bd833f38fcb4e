//! Conversion settings shared by every file of a batch.

use std::path::PathBuf;

use jv_core::{FrameRate, Resolution};
use jv_geometry::WalkableArea;
use jv_output::OverwritePolicy;
use jv_txt::TxtFormat;

/// How a batch reacts to a file that fails to convert.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Record the failure and move on to the next file.
    #[default]
    Continue,
    /// Stop at the first failure; later files are not attempted.
    Abort,
}

/// Settings for [`convert_file`][crate::convert_file] and
/// [`convert_batch`][crate::convert_batch].
///
/// `frame_rate` and `geometry` are validated when the options are built, so
/// a bad override fails before any file is read.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertOptions {
    pub format:         TxtFormat,
    pub frame_rate:     Resolution<FrameRate>,
    pub geometry:       Resolution<WalkableArea>,
    /// Output path; only valid when the batch has exactly one input.
    /// `None` writes next to each input with a `.sqlite` extension.
    pub output:         Option<PathBuf>,
    pub overwrite:      OverwritePolicy,
    pub failure_policy: FailurePolicy,
    /// Convert files concurrently (needs the `parallel` feature).
    pub parallel:       bool,
}
