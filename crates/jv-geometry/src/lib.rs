//! `jv-geometry` — the walkable area shown behind the trajectories.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`area`]    | `WalkableArea` (exterior ring + holes)                     |
//! | [`wkt`]     | `parse_polygon`, `write_polygon`                           |
//! | [`resolve`] | option validation, bounding-box inference                  |
//! | [`error`]   | `GeometryError`, `GeometryResult<T>`                       |
//!
//! A walkable area is either supplied as WKT (inline or from a file) or
//! derived from the trajectory: the tight bounding box of every position,
//! padded by [`BOUNDING_BOX_PADDING`] on each side.

pub mod area;
pub mod error;
pub mod resolve;
pub mod wkt;

#[cfg(test)]
mod tests;

pub use area::WalkableArea;
pub use error::{GeometryError, GeometryResult};
pub use resolve::{
    BOUNDING_BOX_PADDING, geometry_from_options, infer_walkable_area, read_wkt_file,
    resolve_walkable_area,
};
