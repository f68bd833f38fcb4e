//! Read a visualizer database back into memory.

use std::path::Path;
use std::str::FromStr;

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use rustc_hash::FxHashMap;

use jv_core::{AgentId, Frame, FrameGrid, FrameRate, TrajectoryRecord, TrajectoryTable};
use jv_geometry::WalkableArea;

use crate::schema::{DATABASE_VERSION, KEY_FPS, KEY_FRAME_OFFSET, KEY_FRAME_STRIDE, KEY_VERSION};
use crate::{OutputError, OutputResult, StoredTrajectory};

/// Load the database at `path`.
///
/// Databases without `frame_offset`/`frame_stride` keys (written by other
/// tools) are read with offset 0 and stride 1.
pub fn read_sqlite(path: &Path) -> OutputResult<StoredTrajectory> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let meta = read_metadata(&conn)?;
    let version = required(&meta, KEY_VERSION)?;
    if version.parse::<u32>().ok() != Some(DATABASE_VERSION) {
        return Err(OutputError::UnsupportedVersion(version.to_owned()));
    }

    let frame_rate = FrameRate::new(parse_value(required(&meta, KEY_FPS)?, KEY_FPS)?)?;
    let first: u32 = optional(&meta, KEY_FRAME_OFFSET)?.unwrap_or(0);
    let stride: u32 = optional(&meta, KEY_FRAME_STRIDE)?.unwrap_or(1);
    if stride == 0 {
        return Err(OutputError::Corrupt("frame_stride is 0".into()));
    }
    let grid = FrameGrid::new(Frame(first), stride);

    let wkt: String = conn
        .query_row("SELECT wkt FROM geometry LIMIT 1", [], |row| row.get(0))
        .optional()?
        .ok_or_else(|| OutputError::Corrupt("geometry table is empty".into()))?;
    let walkable_area = WalkableArea::from_wkt(&wkt)?;

    let mut stmt = conn.prepare("SELECT frame, id, pos_x, pos_y FROM trajectory_data")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, f64>(2)?,
            row.get::<_, f64>(3)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (stored, id, x, y) = row?;
        let stored = u32::try_from(stored)
            .map_err(|_| OutputError::Corrupt(format!("stored frame {stored} out of range")))?;
        let agent_id = AgentId::try_from(id)
            .map_err(|_| OutputError::Corrupt(format!("agent id {id} out of range")))?;
        let frame = grid.from_stored(stored).ok_or_else(|| {
            OutputError::Corrupt(format!(
                "stored frame {stored} overflows offset {first} with stride {stride}"
            ))
        })?;
        records.push(TrajectoryRecord::new(agent_id, frame, x, y));
    }

    Ok(StoredTrajectory {
        version: DATABASE_VERSION,
        frame_rate,
        walkable_area,
        grid,
        table: TrajectoryTable::new(records)?,
    })
}

// ── Metadata helpers ──────────────────────────────────────────────────────────

fn read_metadata(conn: &Connection) -> OutputResult<FxHashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT key, value FROM metadata")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;
    let mut meta = FxHashMap::default();
    for row in rows {
        let (key, value) = row?;
        meta.insert(key, value);
    }
    Ok(meta)
}

fn required<'m>(meta: &'m FxHashMap<String, String>, key: &str) -> OutputResult<&'m str> {
    meta.get(key)
        .map(String::as_str)
        .ok_or_else(|| OutputError::Corrupt(format!("missing metadata key {key:?}")))
}

fn optional<T: FromStr>(meta: &FxHashMap<String, String>, key: &str) -> OutputResult<Option<T>> {
    meta.get(key).map(|v| parse_value(v, key)).transpose()
}

fn parse_value<T: FromStr>(value: &str, key: &str) -> OutputResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| OutputError::Corrupt(format!("metadata {key} = {value:?} is not valid")))
}
