//! Persistence interfaces for floor plans.
//!
//! This crate owns the versioned wire schema (a tagged `V1 | V2` union with
//! a pure migration), the [`FloorPlanStore`] trait with upsert semantics,
//! a JSON-file reference implementation, and the signed-upload boundary
//! for source images. No network code lives here.

mod schema;
mod store;
mod upload;

pub use schema::{downgrade_to_v1, into_current, migrate_v1, DocV1, FloorPlanDoc, RoomV1};
pub use store::{FloorPlanStore, JsonFileStore, StoreError};
pub use upload::{ImageStorage, SignedUpload};
