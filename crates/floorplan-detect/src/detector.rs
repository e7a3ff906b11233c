use floorplan_core::Room;
use log::info;

use crate::cancel::CancelToken;
use crate::error::DetectError;
use crate::filter::{filter_components, suppress_duplicates};
use crate::flood::{exterior_mask, extract_components};
use crate::params::DetectorParams;
use crate::raster::{binarize, RgbaImageView};
use crate::synth::{synthesize_rooms, SynthesisTarget};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Floor-plan room detector.
///
/// A pure pipeline: binarize → remove exterior → extract components →
/// filter/dedup → synthesize rooms. Each call gets fresh buffers; nothing
/// is retained between invocations, and the caller's state is never
/// touched.
pub struct RoomDetector {
    params: DetectorParams,
}

impl RoomDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Run detection to completion on the calling thread.
    ///
    /// Returns the synthesized rooms, possibly empty: "no rooms found" is
    /// a result, not an error.
    pub fn detect(
        &self,
        src: &RgbaImageView<'_>,
        target: &SynthesisTarget,
    ) -> Result<Vec<Room>, DetectError> {
        self.detect_cancelable(src, target, &CancelToken::new())
    }

    /// Run detection, polling `cancel` between pixels.
    ///
    /// Used by the background runner: a superseded run returns
    /// [`DetectError::Cancelled`] instead of a stale room list.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, src, target, cancel), fields(width = src.width, height = src.height))
    )]
    pub fn detect_cancelable(
        &self,
        src: &RgbaImageView<'_>,
        target: &SynthesisTarget,
        cancel: &CancelToken,
    ) -> Result<Vec<Room>, DetectError> {
        let mask = binarize(src, &self.params)?;
        info!(
            "binarized {}x{} source into {}x{} working mask",
            src.width, src.height, mask.width, mask.height
        );

        let exterior = exterior_mask(&mask, cancel)?;
        let components = extract_components(&mask, &exterior, cancel)?;
        info!("extracted {} enclosed components", components.len());

        let survivors = suppress_duplicates(
            filter_components(components, &self.params),
            &self.params,
        );
        info!("{} candidates survive filtering and dedup", survivors.len());

        Ok(synthesize_rooms(
            &survivors,
            mask.width,
            mask.height,
            target,
        ))
    }
}
