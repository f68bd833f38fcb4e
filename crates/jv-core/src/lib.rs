//! `jv-core` — foundational types for the jpsvis → visualizer converter.
//!
//! Every other `jv-*` crate depends on this one.  It has no `jv-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `Frame`                                       |
//! | [`geo`]         | `Point`, `Bounds`                                        |
//! | [`record`]      | `TrajectoryRecord`, `TrajectoryTable`                    |
//! | [`time`]        | `FrameGrid`, `FrameRate`, frame-rate resolution          |
//! | [`resolution`]  | `Resolution<T>` (explicit value or infer from data)      |
//! | [`error`]       | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod record;
pub mod resolution;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, Point};
pub use ids::{AgentId, Frame};
pub use record::{TrajectoryRecord, TrajectoryTable};
pub use resolution::Resolution;
pub use time::{FrameGrid, FrameRate, infer_frame_rate, resolve_frame_rate};
