//! Plain data types passed into and out of the SQLite backend.

use std::path::PathBuf;

use jv_core::{FrameGrid, FrameRate, TrajectoryTable};
use jv_geometry::WalkableArea;

/// Everything needed to produce one output database.
///
/// All three inputs are already resolved; the writer performs no inference.
#[derive(Clone, Debug)]
pub struct ConversionUnit {
    /// File the table was read from; `None` for tables built in memory.
    pub source:        Option<PathBuf>,
    pub table:         TrajectoryTable,
    pub frame_rate:    FrameRate,
    pub walkable_area: WalkableArea,
    pub destination:   PathBuf,
}

/// What a successful write produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteSummary {
    pub destination:   PathBuf,
    /// Rows in `trajectory_data`.
    pub records:       usize,
    pub agents:        usize,
    /// Rows in `frame_data`.
    pub frames:        u32,
    pub frame_rate:    FrameRate,
    pub grid:          FrameGrid,
}

/// A database read back by [`read_sqlite`][crate::read_sqlite], with frames
/// mapped back to their source numbering.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredTrajectory {
    pub version:       u32,
    pub frame_rate:    FrameRate,
    pub walkable_area: WalkableArea,
    pub grid:          FrameGrid,
    pub table:         TrajectoryTable,
}
