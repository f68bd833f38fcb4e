//! Frame timing model.
//!
//! # Design
//!
//! Source files count time in integer simulation ticks (`Frame`).  Exports
//! often record only every n-th tick, so the frames of a file sit on a grid
//! `first + k * stride`.  The visualizer wants frames numbered `0, 1, 2, …`
//! and a single playback rate, so:
//!
//!   stored_frame = (frame - first) / stride
//!   fps          = 1 / (stride * seconds_per_tick)
//!
//! `seconds_per_tick` comes from the file itself (a declared tick rate or a
//! time column) or from a user-supplied tick rate, which takes precedence.
//! Either way the stored rate is divided by the stride, so an override equal
//! to the file's own `#framerate` yields the same result as inference.

use std::fmt;

use crate::ids::Frame;
use crate::record::TrajectoryTable;
use crate::resolution::Resolution;
use crate::{CoreError, CoreResult};

// ── FrameGrid ─────────────────────────────────────────────────────────────────

/// The lattice every frame of a table lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameGrid {
    /// Smallest frame in the table.
    pub first:  Frame,
    /// Common spacing between frames; always ≥ 1.
    pub stride: u32,
}

impl FrameGrid {
    pub fn new(first: Frame, stride: u32) -> Self {
        debug_assert!(stride >= 1, "stride must be positive");
        Self { first, stride }
    }

    /// Zero-based index of `frame` on this grid.
    #[inline]
    pub fn to_stored(&self, frame: Frame) -> u32 {
        frame.since(self.first) / self.stride
    }

    /// Inverse of [`to_stored`][Self::to_stored]; `None` if the source frame
    /// would not fit in a `u32`.
    #[inline]
    pub fn from_stored(&self, stored: u32) -> Option<Frame> {
        stored
            .checked_mul(self.stride)
            .and_then(|offset| self.first.0.checked_add(offset))
            .map(Frame)
    }
}

// ── FrameRate ─────────────────────────────────────────────────────────────────

/// A rate in frames per second: ticks per second when it describes a source
/// file, stored frames per second once resolved.
///
/// Always finite and strictly positive.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct FrameRate(f64);

impl FrameRate {
    pub fn new(fps: f64) -> CoreResult<Self> {
        if fps.is_finite() && fps > 0.0 {
            Ok(Self(fps))
        } else {
            Err(CoreError::InvalidFrameRate(fps))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = CoreError;
    fn try_from(fps: f64) -> CoreResult<Self> {
        Self::new(fps)
    }
}

impl From<FrameRate> for f64 {
    fn from(rate: FrameRate) -> f64 {
        rate.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fps", self.0)
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Pick the stored frame rate for `table`.
///
/// An `Explicit` rate is the tick rate of the table's frames and takes the
/// place of `seconds_per_tick`; it works for single-snapshot tables too.
/// `Inferred` defers to [`infer_frame_rate`].
pub fn resolve_frame_rate(
    choice:           &Resolution<FrameRate>,
    table:            &TrajectoryTable,
    seconds_per_tick: Option<f64>,
) -> CoreResult<FrameRate> {
    match choice {
        Resolution::Explicit(tick_rate) => {
            let stride = table.frame_grid().map_or(1, |grid| grid.stride);
            FrameRate::new(tick_rate.get() / f64::from(stride))
        }
        Resolution::Inferred => infer_frame_rate(table, seconds_per_tick),
    }
}

/// Derive the frame rate from the frame grid and the file's time base.
///
/// Fails when no agent has two or more frames (a single snapshot carries no
/// spacing) or when the file declares no time base at all.
pub fn infer_frame_rate(
    table:            &TrajectoryTable,
    seconds_per_tick: Option<f64>,
) -> CoreResult<FrameRate> {
    if !table.has_motion() {
        return Err(CoreError::FrameRateInference(
            "no agent is recorded at two or more frames".into(),
        ));
    }
    let grid = table.frame_grid().ok_or_else(|| {
        CoreError::FrameRateInference("trajectory table is empty".into())
    })?;
    let seconds_per_tick = seconds_per_tick.ok_or_else(|| {
        CoreError::FrameRateInference(
            "file declares neither a framerate nor a time column".into(),
        )
    })?;

    FrameRate::new(1.0 / (f64::from(grid.stride) * seconds_per_tick)).map_err(|e| {
        CoreError::FrameRateInference(format!(
            "stride {} at {seconds_per_tick} s per tick: {e}",
            grid.stride
        ))
    })
}
