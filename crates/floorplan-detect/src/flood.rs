//! Queue-backed flood fills over the binary working mask.
//!
//! Both passes are 4-connected and use an explicit array-backed queue
//! instead of recursion: a pathological scan can make a single region span
//! the whole working raster, and the call stack must not depend on region
//! size.

use floorplan_core::Rect;
use log::debug;

use crate::cancel::CancelToken;
use crate::error::DetectError;
use crate::raster::BinaryMask;

/// One connected light region, in working-raster coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Component {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub pixel_count: u32,
}

impl Component {
    #[inline]
    pub fn box_width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn box_height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Bounding box as a core rectangle (for IoU-based dedup).
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.min_x as i32,
            self.min_y as i32,
            self.box_width() as i32,
            self.box_height() as i32,
        )
    }
}

/// How many queue pops happen between cancellation checks.
const CANCEL_STRIDE: usize = 4096;

/// FIFO over pixel indices, preallocated to the worst case (every pixel
/// enqueued once).
struct PixelQueue {
    buf: Vec<i32>,
    head: usize,
}

impl PixelQueue {
    fn with_capacity(pixels: usize) -> Self {
        Self {
            buf: Vec::with_capacity(pixels),
            head: 0,
        }
    }

    #[inline]
    fn push(&mut self, idx: i32) {
        self.buf.push(idx);
    }

    #[inline]
    fn pop(&mut self) -> Option<i32> {
        let idx = self.buf.get(self.head).copied()?;
        self.head += 1;
        Some(idx)
    }

    #[inline]
    fn reset(&mut self) {
        self.buf.clear();
        self.head = 0;
    }
}

#[inline]
fn neighbors4(idx: i32, w: i32, h: i32) -> [i32; 4] {
    let x = idx % w;
    let y = idx / w;
    [
        if x > 0 { idx - 1 } else { -1 },
        if x + 1 < w { idx + 1 } else { -1 },
        if y > 0 { idx - w } else { -1 },
        if y + 1 < h { idx + w } else { -1 },
    ]
}

/// Mark every light pixel reachable from the image border.
///
/// Multi-source flood fill seeded from all four borders. The result has the
/// same shape as the mask: 1 = exterior (page background, anything outside
/// the building envelope), 0 = enclosed or dark.
pub fn exterior_mask(mask: &BinaryMask, cancel: &CancelToken) -> Result<Vec<u8>, DetectError> {
    if cancel.is_cancelled() {
        return Err(DetectError::Cancelled);
    }
    let w = mask.width as i32;
    let h = mask.height as i32;
    let mut exterior = vec![0u8; mask.bits.len()];
    let mut queue = PixelQueue::with_capacity(mask.bits.len());

    let seed = |idx: i32, exterior: &mut [u8], queue: &mut PixelQueue| {
        if mask.bits[idx as usize] == 1 && exterior[idx as usize] == 0 {
            exterior[idx as usize] = 1;
            queue.push(idx);
        }
    };

    for x in 0..w {
        seed(x, &mut exterior, &mut queue);
        seed((h - 1) * w + x, &mut exterior, &mut queue);
    }
    for y in 0..h {
        seed(y * w, &mut exterior, &mut queue);
        seed(y * w + (w - 1), &mut exterior, &mut queue);
    }

    let mut pops = 0usize;
    while let Some(idx) = queue.pop() {
        pops += 1;
        if pops % CANCEL_STRIDE == 0 && cancel.is_cancelled() {
            return Err(DetectError::Cancelled);
        }
        for n in neighbors4(idx, w, h) {
            if n >= 0 && mask.bits[n as usize] == 1 && exterior[n as usize] == 0 {
                exterior[n as usize] = 1;
                queue.push(n);
            }
        }
    }

    debug!(
        "exterior flood marked {} of {} pixels",
        exterior.iter().filter(|&&e| e == 1).count(),
        exterior.len()
    );
    Ok(exterior)
}

/// Collect one [`Component`] per enclosed light region.
///
/// Scans row-major, flood-filling each unvisited interior light pixel, so
/// discovery order is deterministic for a given mask.
pub fn extract_components(
    mask: &BinaryMask,
    exterior: &[u8],
    cancel: &CancelToken,
) -> Result<Vec<Component>, DetectError> {
    if cancel.is_cancelled() {
        return Err(DetectError::Cancelled);
    }
    let w = mask.width as i32;
    let h = mask.height as i32;
    let mut visited = vec![0u8; mask.bits.len()];
    let mut queue = PixelQueue::with_capacity(mask.bits.len());
    let mut components = Vec::new();
    let mut pops = 0usize;

    for start in 0..mask.bits.len() {
        if mask.bits[start] != 1 || exterior[start] == 1 || visited[start] == 1 {
            continue;
        }

        queue.reset();
        visited[start] = 1;
        queue.push(start as i32);

        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut pixel_count = 0u32;

        while let Some(idx) = queue.pop() {
            pops += 1;
            if pops % CANCEL_STRIDE == 0 && cancel.is_cancelled() {
                return Err(DetectError::Cancelled);
            }

            let x = (idx % w) as u32;
            let y = (idx / w) as u32;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            pixel_count += 1;

            for n in neighbors4(idx, w, h) {
                if n >= 0
                    && mask.bits[n as usize] == 1
                    && exterior[n as usize] == 0
                    && visited[n as usize] == 0
                {
                    visited[n as usize] = 1;
                    queue.push(n);
                }
            }
        }

        components.push(Component {
            min_x,
            min_y,
            max_x,
            max_y,
            pixel_count,
        });
    }

    Ok(components)
}
