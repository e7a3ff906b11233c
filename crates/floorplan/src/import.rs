//! End-to-end helpers: decode an image, run room detection.

use std::path::Path;

use floorplan_core::Room;
use floorplan_detect::{
    DetectError, DetectorParams, RasterBuffer, RgbaImageView, RoomDetector, SynthesisTarget,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the image-import helpers.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    /// The source image could not be read from disk.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The source image is corrupt or in an unsupported format. Propagated
    /// unchanged from the decoder.
    #[error(transparent)]
    ImageDecode(#[from] image::ImageError),

    #[error(transparent)]
    Detect(#[from] DetectError),
}

/// Convert an `image::RgbaImage` into the lightweight borrowed view the
/// detector consumes.
pub fn rgba_view(img: &image::RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Move a decoded image into an owned buffer, for handing to the
/// background [`floorplan_detect::DetectionRunner`].
pub fn raster_buffer(img: image::RgbaImage) -> RasterBuffer {
    RasterBuffer {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.into_raw(),
    }
}

/// Detect rooms on a decoded image, synchronously.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params, target), fields(width = img.width(), height = img.height()))
)]
pub fn detect_rooms(
    img: &image::RgbaImage,
    params: &DetectorParams,
    target: &SynthesisTarget,
) -> Result<Vec<Room>, ImportError> {
    let detector = RoomDetector::new(params.clone());
    Ok(detector.detect(&rgba_view(img), target)?)
}

/// Decode an image file and detect rooms on it.
pub fn detect_rooms_from_path(
    path: impl AsRef<Path>,
    params: &DetectorParams,
    target: &SynthesisTarget,
) -> Result<Vec<Room>, ImportError> {
    let img = image::ImageReader::open(path)?.decode()?.to_rgba8();
    detect_rooms(&img, params, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_white_page_detects_nothing() {
        let img = image::RgbaImage::from_pixel(200, 200, image::Rgba([255, 255, 255, 255]));
        let target = SynthesisTarget::new(800, 800, 0, "c", "s");
        let rooms = detect_rooms(&img, &DetectorParams::default(), &target).unwrap();
        assert!(rooms.is_empty());
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let target = SynthesisTarget::new(800, 800, 0, "c", "s");
        let err = detect_rooms_from_path(
            "definitely/not/here.png",
            &DetectorParams::default(),
            &target,
        )
        .unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
