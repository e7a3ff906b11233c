//! Borrowed raster views and the luminance preprocessor.
//!
//! The detector never owns or re-decodes image data: callers hand in an
//! RGBA8 view, the preprocessor samples it once into a small working mask,
//! and every later stage works on that mask alone.

use crate::error::DetectError;
use crate::params::DetectorParams;

/// Borrowed view over a decoded RGBA8 bitmap (row-major, 4 bytes/pixel).
#[derive(Clone, Copy, Debug)]
pub struct RgbaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned RGBA8 bitmap, for handing an image to a detection worker thread.
#[derive(Clone, Debug)]
pub struct RasterBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RasterBuffer {
    #[inline]
    pub fn view(&self) -> RgbaImageView<'_> {
        RgbaImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Binary working mask, one byte per downsampled pixel. 1 = "light"
/// (luminance above threshold, i.e. open floor space), 0 = "dark" (walls,
/// furniture glyphs, text). Owned by the pipeline and discarded after use.
#[derive(Clone, Debug)]
pub struct BinaryMask {
    pub width: usize,
    pub height: usize,
    pub bits: Vec<u8>,
}

impl BinaryMask {
    #[inline]
    pub fn is_light(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x] == 1
    }
}

#[inline]
fn get_rgb(src: &RgbaImageView<'_>, x: i32, y: i32) -> [f32; 3] {
    // clamp-to-edge so upsampled small sources don't grow dark borders
    let x = x.clamp(0, src.width as i32 - 1) as usize;
    let y = y.clamp(0, src.height as i32 - 1) as usize;
    let off = (y * src.width + x) * 4;
    [
        src.data[off] as f32,
        src.data[off + 1] as f32,
        src.data[off + 2] as f32,
    ]
}

#[inline]
fn sample_bilinear_rgb(src: &RgbaImageView<'_>, x: f32, y: f32) -> [f32; 3] {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_rgb(src, x0, y0);
    let p10 = get_rgb(src, x0 + 1, y0);
    let p01 = get_rgb(src, x0, y0 + 1);
    let p11 = get_rgb(src, x0 + 1, y0 + 1);

    let mut out = [0.0f32; 3];
    for c in 0..3 {
        let a = p00[c] + fx * (p10[c] - p00[c]);
        let b = p01[c] + fx * (p11[c] - p01[c]);
        out[c] = a + fy * (b - a);
    }
    out
}

/// Rec. 709 luma weights.
#[inline]
fn luminance(rgb: [f32; 3]) -> f32 {
    0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2]
}

/// Downsample the source into a working raster and binarize it by
/// luminance.
///
/// The working size is `scale = min(1, max_working_width / width)` applied
/// to both dimensions, each floored at `min_working_dim`. This is the only
/// place the original resolution is read; everything downstream is bounded
/// by the working pixel count.
pub fn binarize(
    src: &RgbaImageView<'_>,
    params: &DetectorParams,
) -> Result<BinaryMask, DetectError> {
    if src.width == 0 || src.height == 0 || src.data.len() != src.width * src.height * 4 {
        return Err(DetectError::RasterUnavailable {
            width: src.width,
            height: src.height,
            len: src.data.len(),
        });
    }

    let scale = (params.max_working_width as f32 / src.width as f32).min(1.0);
    let w = ((src.width as f32 * scale).round() as usize).max(params.min_working_dim);
    let h = ((src.height as f32 * scale).round() as usize).max(params.min_working_dim);

    let sx = src.width as f32 / w as f32;
    let sy = src.height as f32 / h as f32;

    let mut bits = vec![0u8; w * h];
    for y in 0..h {
        let src_y = (y as f32 + 0.5) * sy - 0.5;
        for x in 0..w {
            let src_x = (x as f32 + 0.5) * sx - 0.5;
            let rgb = sample_bilinear_rgb(src, src_x, src_y);
            if luminance(rgb) > params.luminance_threshold {
                bits[y * w + x] = 1;
            }
        }
    }

    Ok(BinaryMask {
        width: w,
        height: h,
        bits,
    })
}
