//! Single-file conversion.

use std::path::{Path, PathBuf};

use jv_core::{FrameRate, Resolution, TrajectoryTable, resolve_frame_rate};
use jv_geometry::{WalkableArea, resolve_walkable_area};
use jv_output::{ConversionUnit, OverwritePolicy, SqliteWriter, WriteSummary};
use jv_txt::load_trajectory_txt;
use tracing::{info, warn};

use crate::{ConvertOptions, ConvertResult};

/// Relative difference below which two frame rates count as equal.
const FRAME_RATE_TOLERANCE: f64 = 1e-9;

/// `source` with its extension replaced by `sqlite`.
pub fn default_output_path(source: &Path) -> PathBuf {
    source.with_extension("sqlite")
}

/// Convert the trajectory file at `source` into a database at `destination`.
pub fn convert_file(
    source:      &Path,
    destination: &Path,
    options:     &ConvertOptions,
) -> ConvertResult<WriteSummary> {
    let parsed = load_trajectory_txt(source, &options.format)?;
    let seconds_per_tick = parsed.metadata.seconds_per_tick;

    if let (Resolution::Explicit(rate), Some(seconds_per_tick)) =
        (&options.frame_rate, seconds_per_tick)
    {
        warn_on_frame_rate_mismatch(source, *rate, seconds_per_tick);
    }
    let frame_rate = resolve_frame_rate(&options.frame_rate, &parsed.table, seconds_per_tick)?;
    let walkable_area = resolve_walkable_area(&options.geometry, &parsed.table)?;

    let unit = ConversionUnit {
        source: Some(source.to_path_buf()),
        table: parsed.table,
        frame_rate,
        walkable_area,
        destination: destination.to_path_buf(),
    };
    let summary = SqliteWriter::new(options.overwrite).write(&unit)?;

    info!(
        source = %source.display(),
        output = %destination.display(),
        agents = summary.agents,
        frames = summary.frames,
        %frame_rate,
        "converted"
    );
    Ok(summary)
}

/// Write an in-memory table without going through the text parser.
///
/// `frame_rate` is the tick rate of the table's frames, resolved the same way
/// as an explicit `--frame-rate`.  `walkable_area` of `None` falls back to
/// the padded bounding box of the table's positions.
pub fn write_trajectory_to_sqlite(
    table:         TrajectoryTable,
    frame_rate:    FrameRate,
    walkable_area: Option<WalkableArea>,
    output:        &Path,
    overwrite:     OverwritePolicy,
) -> ConvertResult<WriteSummary> {
    let frame_rate = resolve_frame_rate(&Resolution::Explicit(frame_rate), &table, None)?;
    let walkable_area = resolve_walkable_area(&Resolution::from(walkable_area), &table)?;
    let unit = ConversionUnit {
        source: None,
        table,
        frame_rate,
        walkable_area,
        destination: output.to_path_buf(),
    };
    Ok(SqliteWriter::new(overwrite).write(&unit)?)
}

/// The override wins; a file whose declared tick rate says otherwise is
/// only worth a warning.
fn warn_on_frame_rate_mismatch(source: &Path, explicit: FrameRate, seconds_per_tick: f64) {
    let (a, b) = (explicit.get(), 1.0 / seconds_per_tick);
    if (a - b).abs() > FRAME_RATE_TOLERANCE * a.max(b) {
        warn!(
            source = %source.display(),
            %explicit,
            from_file = b,
            "frame rate override differs from the file's time base"
        );
    }
}
