//! Geometry resolution: user-supplied WKT or a box inferred from the data.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use jv_core::{Resolution, TrajectoryTable};
use tracing::{debug, warn};

use crate::{GeometryError, GeometryResult, WalkableArea};

/// Distance (meters) the inferred box extends past the outermost position.
pub const BOUNDING_BOX_PADDING: f64 = 1.0;

/// Validate the two mutually exclusive geometry inputs.
///
/// Called once before any file is converted, so a bad or conflicting
/// geometry never leaves output behind.
pub fn geometry_from_options(
    inline: Option<&str>,
    file:   Option<&Path>,
) -> GeometryResult<Resolution<WalkableArea>> {
    match (inline, file) {
        (Some(_), Some(_)) => Err(GeometryError::ConflictingGeometry),
        (Some(wkt), None) => {
            debug!("using inline geometry");
            WalkableArea::from_wkt(wkt).map(Resolution::Explicit)
        }
        (None, Some(path)) => {
            debug!(path = %path.display(), "using geometry file");
            read_wkt_file(path).map(Resolution::Explicit)
        }
        (None, None) => Ok(Resolution::Inferred),
    }
}

/// Read the polygon stored on the first line of `path`.
pub fn read_wkt_file(path: &Path) -> GeometryResult<WalkableArea> {
    let io_err = |source| GeometryError::Io { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(io_err)?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).map_err(io_err)?;
    WalkableArea::from_wkt(line.trim())
}

/// Bounding box of every position, padded by [`BOUNDING_BOX_PADDING`].
///
/// The padding keeps the rectangle non-degenerate even when all positions
/// coincide or lie on a line.
pub fn infer_walkable_area(table: &TrajectoryTable) -> GeometryResult<WalkableArea> {
    let bounds = table.bounds().ok_or(GeometryError::NoPositions)?;
    Ok(WalkableArea::rectangle(bounds.expand(BOUNDING_BOX_PADDING)))
}

/// Pick the walkable area for `table`.
pub fn resolve_walkable_area(
    choice: &Resolution<WalkableArea>,
    table:  &TrajectoryTable,
) -> GeometryResult<WalkableArea> {
    match choice {
        Resolution::Explicit(area) => Ok(area.clone()),
        Resolution::Inferred => {
            let area = infer_walkable_area(table)?;
            warn!("no walkable area provided, using bounding box instead: {area}");
            Ok(area)
        }
    }
}
