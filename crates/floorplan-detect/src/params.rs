use serde::{Deserialize, Serialize};

/// Tunable parameters for the room-detection pipeline.
///
/// The thresholds below are empirical: they were chosen against scanned
/// residential floor plans and are expected to be re-tuned against a labeled
/// corpus rather than treated as optimal. All of them (de)serialize, so a
/// tuning sweep can drive the detector from stored configs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorParams {
    /// Cap on the working raster width. The source image is downsampled to
    /// at most this many pixels wide before any mask work, bounding memory
    /// and CPU for the whole pipeline.
    #[serde(default = "default_max_working_width")]
    pub max_working_width: usize,

    /// Floor on both working-raster dimensions. Very small sources are
    /// upsampled to keep the shape filters meaningful.
    #[serde(default = "default_min_working_dim")]
    pub min_working_dim: usize,

    /// Luminance cut (0..255) above which a pixel counts as "light", i.e.
    /// open floor space. Floor-plan scans are near-white line art, so the
    /// cut sits close to white.
    #[serde(default = "default_luminance_threshold")]
    pub luminance_threshold: f32,

    /// Minimal bounding-box side (working-raster pixels) for a component to
    /// qualify as a room.
    #[serde(default = "default_min_box_px")]
    pub min_box_px: u32,

    /// Minimal pixel mass for a component to qualify as a room.
    #[serde(default = "default_min_pixel_count")]
    pub min_pixel_count: u32,

    /// Minimal `pixel_count / box_area` density. Boxes mostly *not* filled
    /// by their component are irregular blobs (corridors, noise), not rooms.
    #[serde(default = "default_min_fill_ratio")]
    pub min_fill_ratio: f32,

    /// A candidate is dropped when its IoU against an already-kept box
    /// exceeds this (near-duplicate suppression, largest box wins).
    #[serde(default = "default_iou_threshold")]
    pub iou_threshold: f32,

    /// Upper bound on surviving components, protecting the editor from
    /// being flooded by noise on pathological inputs.
    #[serde(default = "default_max_rooms")]
    pub max_rooms: usize,
}

fn default_max_working_width() -> usize {
    900
}
fn default_min_working_dim() -> usize {
    140
}
fn default_luminance_threshold() -> f32 {
    232.0
}
fn default_min_box_px() -> u32 {
    16
}
fn default_min_pixel_count() -> u32 {
    180
}
fn default_min_fill_ratio() -> f32 {
    0.45
}
fn default_iou_threshold() -> f32 {
    0.82
}
fn default_max_rooms() -> usize {
    40
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            max_working_width: default_max_working_width(),
            min_working_dim: default_min_working_dim(),
            luminance_threshold: default_luminance_threshold(),
            min_box_px: default_min_box_px(),
            min_pixel_count: default_min_pixel_count(),
            min_fill_ratio: default_min_fill_ratio(),
            iou_threshold: default_iou_threshold(),
            max_rooms: default_max_rooms(),
        }
    }
}
