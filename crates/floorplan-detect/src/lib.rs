//! Best-effort room detection over scanned floor-plan rasters.
//!
//! Given a decoded bitmap of a floor plan (a scan or a photo), segment it
//! into candidate room rectangles a user then drags, resizes and labels in
//! the editor. The pipeline:
//!
//! 1. downsample + binarize by luminance ([`binarize`])
//! 2. flood-fill the page background away from the borders ([`exterior_mask`])
//! 3. collect enclosed connected components ([`extract_components`])
//! 4. reject non-room shapes, suppress near-duplicates ([`filter_components`],
//!    [`suppress_duplicates`])
//! 5. rescale into the editor grid and materialize [`floorplan_core::Room`]s
//!    ([`synthesize_rooms`])
//!
//! The detector is a heuristic seed generator, not floor-plan OCR: a human
//! corrects the result afterwards, so "zero rooms" is an ordinary outcome.
//! Runs are pure functions of (image, params, target); the background
//! [`DetectionRunner`] makes them cancelable and lets a newer request
//! supersede an in-flight one.

mod cancel;
mod detector;
mod error;
mod filter;
mod flood;
mod params;
mod raster;
mod synth;
mod task;

pub use cancel::CancelToken;
pub use detector::RoomDetector;
pub use error::DetectError;
pub use filter::{filter_components, suppress_duplicates};
pub use flood::{exterior_mask, extract_components, Component};
pub use params::DetectorParams;
pub use raster::{binarize, BinaryMask, RasterBuffer, RgbaImageView};
pub use synth::{synthesize_rooms, SynthesisTarget};
pub use task::{spawn_detection, DetectionHandle, DetectionRunner};
