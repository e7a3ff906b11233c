use serde::{Deserialize, Serialize};

/// Editor grid spacing. Every stored room coordinate is a multiple of this.
pub const GRID: i32 = 20;

/// Smallest width a room may have after normalization (multiple of [`GRID`]).
pub const MIN_ROOM_WIDTH: i32 = 40;

/// Smallest height a room may have after normalization (multiple of [`GRID`]).
pub const MIN_ROOM_HEIGHT: i32 = 40;

/// Round `n` to the nearest multiple of [`GRID`].
#[inline]
pub fn snap(n: f32) -> i32 {
    (n / GRID as f32).round() as i32 * GRID
}

/// Axis-aligned rectangle in editor coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Intersection-over-union of two rectangles.
    ///
    /// Returns `0.0` for disjoint or degenerate rectangles, `1.0` for
    /// identical ones. Used for duplicate suppression; the editor itself
    /// allows overlapping rooms.
    pub fn iou(&self, other: &Rect) -> f32 {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return 0.0;
        }

        let ix = (self.x + self.width).min(other.x + other.width) - self.x.max(other.x);
        let iy = (self.y + self.height).min(other.y + other.height) - self.y.max(other.y);
        if ix <= 0 || iy <= 0 {
            return 0.0;
        }

        let inter = ix as i64 * iy as i64;
        let union = self.area() + other.area() - inter;
        inter as f32 / union as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn snap_rounds_to_nearest_grid_multiple() {
        assert_eq!(snap(0.0), 0);
        assert_eq!(snap(9.9), 0);
        assert_eq!(snap(10.0), 20);
        assert_eq!(snap(47.0), 40);
        assert_eq!(snap(-17.0), -20);
        assert_eq!(snap(250.0), 260);
    }

    #[test]
    fn min_room_dims_sit_on_the_grid() {
        assert_eq!(MIN_ROOM_WIDTH % GRID, 0);
        assert_eq!(MIN_ROOM_HEIGHT % GRID, 0);
    }

    #[test]
    fn iou_of_identical_rect_is_one() {
        let a = Rect::new(20, 40, 120, 80);
        assert_relative_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn iou_of_disjoint_rects_is_zero() {
        let a = Rect::new(0, 0, 40, 40);
        let b = Rect::new(100, 100, 40, 40);
        assert_eq!(a.iou(&b), 0.0);
        // touching edges do not overlap
        let c = Rect::new(40, 0, 40, 40);
        assert_eq!(a.iou(&c), 0.0);
    }

    #[test]
    fn iou_is_symmetric() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_relative_eq!(a.iou(&b), b.iou(&a));
        assert!(a.iou(&b) > 0.0 && a.iou(&b) < 1.0);
    }

    #[test]
    fn iou_of_degenerate_rect_is_zero() {
        let a = Rect::new(0, 0, 0, 40);
        let b = Rect::new(0, 0, 40, 40);
        assert_eq!(a.iou(&b), 0.0);
        assert_eq!(a.iou(&a), 0.0);
    }

    #[test]
    fn iou_half_overlap() {
        let a = Rect::new(0, 0, 40, 40);
        let b = Rect::new(20, 0, 40, 40);
        // intersection 800, union 2400
        assert_relative_eq!(a.iou(&b), 1.0 / 3.0, epsilon = 1e-6);
    }
}
