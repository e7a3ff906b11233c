//! Core types and utilities for floor-plan room editing.
//!
//! This crate is intentionally small and purely geometric/structural. It does
//! *not* depend on any image type or detection algorithm: it owns the grid
//! math, the editor entities (rooms, pins, legend, sections) and the
//! defensive normalization that repairs malformed records on load.

mod geom;
mod id;
mod legend;
mod logger;
mod plan;
mod room;

pub use geom::{snap, Rect, GRID, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH};
pub use id::fresh_id;
pub use legend::{ColorLegend, HouseSections, LegendEntry, ModelError, SectionEntry};
pub use plan::{DetectMerge, FloorPlan};
pub use room::{normalize_room, Pin, Room};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
