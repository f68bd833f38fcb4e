//! Table layout of the visualizer database (format version 2).
//!
//! | Table             | Rows                                                |
//! |-------------------|-----------------------------------------------------|
//! | `metadata`        | key/value text pairs, see the `KEY_*` constants     |
//! | `geometry`        | one row: hash + WKT of the walkable area            |
//! | `frame_data`      | one row per stored frame → geometry hash            |
//! | `trajectory_data` | one row per record; orientation columns are zero    |
//!
//! Stored frames start at 0.  `frame_offset` and `frame_stride` map them
//! back to source frames: `source = offset + stored * stride`.

/// Value of the `version` metadata key this crate writes and reads.
pub const DATABASE_VERSION: u32 = 2;

pub const KEY_VERSION:      &str = "version";
pub const KEY_FPS:          &str = "fps";
pub const KEY_XMIN:         &str = "xmin";
pub const KEY_XMAX:         &str = "xmax";
pub const KEY_YMIN:         &str = "ymin";
pub const KEY_YMAX:         &str = "ymax";
pub const KEY_FRAME_OFFSET: &str = "frame_offset";
pub const KEY_FRAME_STRIDE: &str = "frame_stride";

pub(crate) const CREATE_TABLES: &str = "
    CREATE TABLE metadata (
        key   TEXT NOT NULL UNIQUE PRIMARY KEY,
        value TEXT NOT NULL
    );
    CREATE TABLE geometry (
        hash INTEGER NOT NULL,
        wkt  TEXT    NOT NULL
    );
    CREATE UNIQUE INDEX geometry_hash ON geometry (hash);
    CREATE TABLE frame_data (
        frame         INTEGER NOT NULL,
        geometry_hash INTEGER NOT NULL
    );
    CREATE TABLE trajectory_data (
        frame INTEGER NOT NULL,
        id    INTEGER NOT NULL,
        pos_x REAL    NOT NULL,
        pos_y REAL    NOT NULL,
        ori_x REAL    NOT NULL,
        ori_y REAL    NOT NULL
    );";

// Built after the bulk insert.
pub(crate) const CREATE_TRAJECTORY_INDICES: &str = "
    CREATE INDEX frame_id_idx ON trajectory_data (frame, id);
    CREATE INDEX id_idx       ON trajectory_data (id);";
