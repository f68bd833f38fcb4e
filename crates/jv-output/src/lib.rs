//! `jv-output` — the visualizer's single-file SQLite trajectory format.
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`schema`] | table layout, metadata keys, `DATABASE_VERSION`             |
//! | [`row`]    | `ConversionUnit`, `WriteSummary`, `StoredTrajectory`        |
//! | [`sqlite`] | `SqliteWriter`, `OverwritePolicy`                           |
//! | [`reader`] | `read_sqlite`                                               |
//! | [`error`]  | `OutputError`, `OutputResult<T>`                            |
//!
//! Output files are built under a temporary name next to the destination
//! and renamed into place only after the last row is committed, so readers
//! never see a half-written database.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jv_output::{ConversionUnit, OverwritePolicy, SqliteWriter};
//!
//! let summary = SqliteWriter::new(OverwritePolicy::Overwrite).write(&unit)?;
//! println!("{} rows → {}", summary.records, summary.destination.display());
//! ```

pub mod error;
pub mod reader;
pub mod row;
pub mod schema;
pub mod sqlite;


pub use error::{OutputError, OutputResult};
pub use reader::read_sqlite;
pub use row::{ConversionUnit, StoredTrajectory, WriteSummary};
pub use schema::DATABASE_VERSION;
pub use sqlite::{OverwritePolicy, SqliteWriter};
