//! The walkable-area polygon.

use std::fmt;
use std::str::FromStr;

use jv_core::{Bounds, Point};

use crate::{GeometryError, GeometryResult, wkt};

/// A closed polygon bounding the region pedestrians may occupy.
///
/// Rings are stored open: the first vertex is not repeated at the end.  The
/// exterior has at least three vertices; interior rings (obstacles) follow
/// the same rule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkableArea {
    exterior:  Vec<Point>,
    interiors: Vec<Vec<Point>>,
}

impl WalkableArea {
    /// Polygon without holes.
    pub fn new(exterior: Vec<Point>) -> GeometryResult<Self> {
        Self::with_holes(exterior, Vec::new())
    }

    /// Polygon with obstacles cut out of it.
    ///
    /// A closing vertex equal to the first one is dropped from every ring.
    pub fn with_holes(exterior: Vec<Point>, interiors: Vec<Vec<Point>>) -> GeometryResult<Self> {
        Ok(Self {
            exterior:  open_ring(exterior)?,
            interiors: interiors.into_iter().map(open_ring).collect::<GeometryResult<_>>()?,
        })
    }

    /// Axis-aligned rectangle covering `bounds`.
    ///
    /// Vertices run counter-clockwise from `(max_x, min_y)`, the order the
    /// visualizer's own tooling produces for boxes.
    pub fn rectangle(bounds: Bounds) -> Self {
        Self {
            exterior: vec![
                Point::new(bounds.max_x, bounds.min_y),
                Point::new(bounds.max_x, bounds.max_y),
                Point::new(bounds.min_x, bounds.max_y),
                Point::new(bounds.min_x, bounds.min_y),
            ],
            interiors: Vec::new(),
        }
    }

    /// Parse a single WKT `POLYGON`.
    pub fn from_wkt(text: &str) -> GeometryResult<Self> {
        wkt::parse_polygon(text)
    }

    pub fn to_wkt(&self) -> String {
        wkt::write_polygon(self)
    }

    pub fn exterior(&self) -> &[Point] {
        &self.exterior
    }

    pub fn interiors(&self) -> &[Vec<Point>] {
        &self.interiors
    }

    /// Bounding box of the exterior ring.
    pub fn bounds(&self) -> Bounds {
        let first = Bounds::at(self.exterior[0]);
        self.exterior[1..].iter().copied().fold(first, Bounds::include)
    }
}

impl FromStr for WalkableArea {
    type Err = GeometryError;
    fn from_str(s: &str) -> GeometryResult<Self> {
        Self::from_wkt(s)
    }
}

impl fmt::Display for WalkableArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wkt())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_ring(mut ring: Vec<Point>) -> GeometryResult<Vec<Point>> {
    if let Some(bad) = ring.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(GeometryError::parse(format!("non-finite vertex {bad}")));
    }
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 {
        return Err(GeometryError::parse(format!(
            "ring needs at least 3 distinct vertices, got {}",
            ring.len()
        )));
    }
    Ok(ring)
}
