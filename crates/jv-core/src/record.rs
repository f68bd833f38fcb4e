//! Trajectory records and the per-file trajectory table.

use crate::geo::{Bounds, Point};
use crate::ids::{AgentId, Frame};
use crate::time::FrameGrid;
use crate::{CoreError, CoreResult};

/// Position of one agent at one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryRecord {
    pub agent_id: AgentId,
    pub frame:    Frame,
    pub x:        f64,
    pub y:        f64,
}

impl TrajectoryRecord {
    #[inline]
    pub fn new(agent_id: AgentId, frame: Frame, x: f64, y: f64) -> Self {
        Self { agent_id, frame, x, y }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    fn key(&self) -> (AgentId, Frame) {
        (self.agent_id, self.frame)
    }
}

/// All records of one input file, sorted by `(agent_id, frame)`.
///
/// Immutable once built.  Construction enforces the per-agent invariant:
/// frames of one agent are strictly increasing, so no `(agent_id, frame)`
/// pair appears twice.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryTable {
    records: Vec<TrajectoryRecord>,
}

impl TrajectoryTable {
    /// Sort `records` and validate them.
    ///
    /// On a duplicate `(agent_id, frame)` pair the error carries the input
    /// position of the later occurrence, so callers can map it back to a
    /// source line.
    pub fn new(records: Vec<TrajectoryRecord>) -> CoreResult<Self> {
        let mut order: Vec<usize> = (0..records.len()).collect();
        // Stable: equal keys keep input order, so `pair[1]` is the later one.
        order.sort_by_key(|&i| records[i].key());

        if let Some(pair) = order
            .windows(2)
            .find(|pair| records[pair[0]].key() == records[pair[1]].key())
        {
            let dup = &records[pair[1]];
            return Err(CoreError::DuplicateFrame {
                agent: dup.agent_id,
                frame: dup.frame,
                index: pair[1],
            });
        }

        let records = order.into_iter().map(|i| records[i]).collect();
        Ok(Self { records })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[TrajectoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryRecord> {
        self.records.iter()
    }

    /// One `(agent, records)` entry per agent, in ascending id order.
    /// Each slice is sorted by frame.
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &[TrajectoryRecord])> + '_ {
        self.records
            .chunk_by(|a, b| a.agent_id == b.agent_id)
            .map(|chunk| (chunk[0].agent_id, chunk))
    }

    pub fn agent_count(&self) -> usize {
        self.agents().count()
    }

    /// `true` if at least one agent was recorded at two or more frames.
    pub fn has_motion(&self) -> bool {
        self.agents().any(|(_, records)| records.len() >= 2)
    }

    /// Smallest and largest frame in the table.
    pub fn frame_range(&self) -> Option<(Frame, Frame)> {
        let first = self.records.first()?.frame;
        Some(self.records.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.frame), hi.max(r.frame))
        }))
    }

    /// Tightest box around every recorded position.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.records.iter().map(TrajectoryRecord::position))
    }

    /// First frame and common stride of every recorded frame.
    ///
    /// The stride is the GCD of all offsets `frame - first`, which also
    /// divides every consecutive per-agent frame delta.  It is 1 when all
    /// records share the first frame.
    pub fn frame_grid(&self) -> Option<FrameGrid> {
        let (first, _) = self.frame_range()?;
        let stride = self
            .records
            .iter()
            .map(|r| r.frame.since(first))
            .fold(0, gcd);
        Some(FrameGrid::new(first, stride.max(1)))
    }
}

impl<'a> IntoIterator for &'a TrajectoryTable {
    type Item = &'a TrajectoryRecord;
    type IntoIter = std::slice::Iter<'a, TrajectoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}
