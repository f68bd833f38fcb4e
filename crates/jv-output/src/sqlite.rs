//! SQLite output backend.
//!
//! The database is built inside a temporary file in the destination's
//! directory and renamed over the destination after the transaction commits.
//! Any failure before the rename drops the temporary file, so the
//! destination is either untouched or complete.  Temporary files are created
//! owner-only; the finished database is opened up to `0644` before the
//! rename.

use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use rustc_hash::FxHasher;
use tempfile::NamedTempFile;
use tracing::debug;

use jv_core::{Frame, FrameGrid};

use crate::schema::{
    CREATE_TABLES, CREATE_TRAJECTORY_INDICES, DATABASE_VERSION, KEY_FPS, KEY_FRAME_OFFSET,
    KEY_FRAME_STRIDE, KEY_VERSION, KEY_XMAX, KEY_XMIN, KEY_YMAX, KEY_YMIN,
};
use crate::{ConversionUnit, OutputError, OutputResult, WriteSummary};

/// Mode of a finished database: owner read-write, everyone else read.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// What to do when the destination already exists.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverwritePolicy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Leave it alone and report [`OutputError::PathConflict`].
    Fail,
}

/// Writes [`ConversionUnit`]s to version-2 visualizer databases.
#[derive(Copy, Clone, Debug, Default)]
pub struct SqliteWriter {
    overwrite: OverwritePolicy,
}

impl SqliteWriter {
    pub fn new(overwrite: OverwritePolicy) -> Self {
        Self { overwrite }
    }

    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite
    }

    /// Write `unit` to `unit.destination`.
    pub fn write(&self, unit: &ConversionUnit) -> OutputResult<WriteSummary> {
        let dest = unit.destination.as_path();
        if self.overwrite == OverwritePolicy::Fail && dest.exists() {
            return Err(OutputError::PathConflict(dest.to_path_buf()));
        }

        let temp = create_temp_file(dest)?;
        debug!(
            source = ?unit.source,
            temp = %temp.path().display(),
            "building database"
        );

        let summary = {
            let mut conn = Connection::open(temp.path())?;
            let summary = populate(&mut conn, unit)?;
            conn.close().map_err(|(_, e)| e)?;
            summary
        };
        set_output_permissions(temp.path()).map_err(|source| OutputError::Io {
            path: temp.path().to_path_buf(),
            source,
        })?;

        self.persist(temp, dest)?;
        debug!(
            dest = %dest.display(),
            records = summary.records,
            frames = summary.frames,
            "database written"
        );
        Ok(summary)
    }

    fn persist(&self, temp: NamedTempFile, dest: &Path) -> OutputResult<()> {
        let result = match self.overwrite {
            OverwritePolicy::Overwrite => temp.persist(dest),
            OverwritePolicy::Fail => temp.persist_noclobber(dest),
        };
        // A failed persist hands the temp file back; dropping it removes it.
        result.map(drop).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                OutputError::PathConflict(dest.to_path_buf())
            } else {
                OutputError::Persist { path: dest.to_path_buf(), source: e.error }
            }
        })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn create_temp_file(dest: &Path) -> OutputResult<NamedTempFile> {
    let name = dest
        .file_name()
        .ok_or_else(|| OutputError::InvalidDestination(dest.to_path_buf()))?;
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tempfile::Builder::new()
        .prefix(&format!(".{}.", name.to_string_lossy()))
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|source| OutputError::Io { path: dir, source })
}

#[cfg(unix)]
fn set_output_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(OUTPUT_MODE))
}

#[cfg(not(unix))]
fn set_output_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Stable integer key for a geometry's WKT.
pub(crate) fn geometry_hash(wkt: &str) -> i64 {
    let mut hasher = FxHasher::default();
    wkt.hash(&mut hasher);
    hasher.finish() as i64
}

fn populate(conn: &mut Connection, unit: &ConversionUnit) -> OutputResult<WriteSummary> {
    let table = &unit.table;
    let grid = table.frame_grid().unwrap_or(FrameGrid::new(Frame(0), 1));
    let wkt = unit.walkable_area.to_wkt();
    let hash = geometry_hash(&wkt);
    let bounds = unit.walkable_area.bounds();

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_TABLES)?;

    let last_stored = {
        let mut meta = tx.prepare("INSERT INTO metadata (key, value) VALUES (?1, ?2)")?;
        for (key, value) in [
            (KEY_VERSION, DATABASE_VERSION.to_string()),
            (KEY_FPS, unit.frame_rate.get().to_string()),
            (KEY_XMIN, bounds.min_x.to_string()),
            (KEY_XMAX, bounds.max_x.to_string()),
            (KEY_YMIN, bounds.min_y.to_string()),
            (KEY_YMAX, bounds.max_y.to_string()),
            (KEY_FRAME_OFFSET, grid.first.get().to_string()),
            (KEY_FRAME_STRIDE, grid.stride.to_string()),
        ] {
            meta.execute(params![key, value])?;
        }

        tx.execute("INSERT INTO geometry (hash, wkt) VALUES (?1, ?2)", params![hash, wkt])?;

        let mut rows = tx.prepare(
            "INSERT INTO trajectory_data (frame, id, pos_x, pos_y, ori_x, ori_y) \
             VALUES (?1, ?2, ?3, ?4, 0.0, 0.0)",
        )?;
        let mut last_stored = 0u32;
        for r in table {
            let stored = grid.to_stored(r.frame);
            last_stored = last_stored.max(stored);
            rows.execute(params![stored, r.agent_id.get(), r.x, r.y])?;
        }

        let mut frames =
            tx.prepare("INSERT INTO frame_data (frame, geometry_hash) VALUES (?1, ?2)")?;
        for stored in 0..=last_stored {
            frames.execute(params![stored, hash])?;
        }
        last_stored
    };

    tx.execute_batch(CREATE_TRAJECTORY_INDICES)?;
    tx.commit()?;

    Ok(WriteSummary {
        destination: unit.destination.clone(),
        records:     table.len(),
        agents:      table.agent_count(),
        frames:      last_stored + 1,
        frame_rate:  unit.frame_rate,
        grid,
    })
}
