//! `jv-convert` — turns legacy jpsvis trajectory text into visualizer SQLite
//! databases.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`options`]  | `ConvertOptions`, `FailurePolicy`                             |
//! | [`pipeline`] | `convert_file`, `write_trajectory_to_sqlite`, output naming   |
//! | [`batch`]    | `expand_pattern`, `convert_batch`, `BatchReport`              |
//! | [`error`]    | `ConvertError`, `ConvertResult<T>`                            |
//!
//! # One file
//!
//! parse → resolve frame rate → resolve walkable area → write.  Each step
//! is owned by a lower crate (`jv-txt`, `jv-core`, `jv-geometry`,
//! `jv-output`); this crate only wires them together.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | `convert_batch` honours `ConvertOptions::parallel`.     |
//! | `serde`    | Serialize/Deserialize on `ConvertOptions`.              |

pub mod batch;
pub mod error;
pub mod options;
pub mod pipeline;


pub use batch::{BatchReport, Converted, FileFailure, convert_batch, expand_pattern};
pub use error::{ConvertError, ConvertResult};
pub use options::{ConvertOptions, FailurePolicy};
pub use pipeline::{convert_file, default_output_path, write_trajectory_to_sqlite};

// Callers building options need these without depending on every crate.
pub use jv_core::{FrameRate, Resolution, TrajectoryRecord, TrajectoryTable};
pub use jv_geometry::{WalkableArea, geometry_from_options};
pub use jv_output::{ConversionUnit, OverwritePolicy, WriteSummary, read_sqlite};
pub use jv_txt::TxtFormat;
