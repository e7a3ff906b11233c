//! High-level facade crate for the `floorplan-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - (feature-gated) end-to-end helpers that decode an image with the
//!   `image` crate and run the room detector over it
//! - a small CLI (`floorplan detect`, feature `cli`)
//!
//! ## Quickstart
//!
//! ```no_run
//! use floorplan::detect::{DetectorParams, SynthesisTarget};
//! use floorplan::FloorPlan;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::ImageReader::open("plan.png")?.decode()?.to_rgba8();
//!
//! let mut plan = FloorPlan::new();
//! let target = SynthesisTarget::new(
//!     1200,
//!     900,
//!     plan.next_room_index(),
//!     plan.legend.first_id(),
//!     plan.sections.first_id(),
//! );
//! let rooms = floorplan::import::detect_rooms(&img, &DetectorParams::default(), &target)?;
//! plan.apply_detected(rooms, floorplan::DetectMerge::Replace);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`core`]: grid geometry, rooms/pins/legend/sections, normalization.
//! - [`detect`]: the detection pipeline and the cancelable background runner.
//! - [`store`]: versioned persistence schema, store trait, JSON reference store.
//! - [`import`] (feature `image`): end-to-end helpers from `image` types.

pub use floorplan_core as core;
pub use floorplan_detect as detect;
pub use floorplan_store as store;

pub use floorplan_core::{DetectMerge, FloorPlan, Pin, Room};
pub use floorplan_detect::{DetectorParams, RoomDetector, SynthesisTarget};
pub use floorplan_store::{FloorPlanStore, JsonFileStore};

#[cfg(feature = "image")]
pub mod import;
