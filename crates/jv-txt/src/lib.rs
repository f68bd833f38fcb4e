//! `jv-txt` — reads legacy trajectory text exports into a `TrajectoryTable`.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`format`] | `TxtFormat`, `ColumnLayout`, `Delimiter`, `LengthUnit`      |
//! | [`header`] | `TxtMetadata` — framerate and unit from comment lines       |
//! | [`loader`] | `load_trajectory_txt`, `load_trajectory_reader`             |
//! | [`error`]  | `TxtError`, `TxtResult<T>`                                  |
//!
//! Formats are described by data, not detected: pick
//! [`TxtFormat::JPSVIS`] (the default) or [`TxtFormat::CSV`], or build a
//! `TxtFormat` with a custom [`ColumnLayout`].

pub mod error;
pub mod format;
pub mod header;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::{TxtError, TxtResult};
pub use format::{ColumnLayout, Delimiter, LengthUnit, TxtFormat};
pub use header::TxtMetadata;
pub use loader::{ParsedTrajectory, load_trajectory_reader, load_trajectory_txt};
