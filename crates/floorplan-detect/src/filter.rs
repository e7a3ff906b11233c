//! Shape filtering and near-duplicate suppression of room candidates.

use log::debug;

use crate::flood::Component;
use crate::params::DetectorParams;

/// Drop components too small, too sparse or too irregular to be a room.
pub fn filter_components(components: Vec<Component>, params: &DetectorParams) -> Vec<Component> {
    let before = components.len();
    let kept: Vec<Component> = components
        .into_iter()
        .filter(|c| {
            if c.box_width() < params.min_box_px || c.box_height() < params.min_box_px {
                return false;
            }
            if c.pixel_count < params.min_pixel_count {
                return false;
            }
            let box_area = c.box_width() as f32 * c.box_height() as f32;
            c.pixel_count as f32 / box_area >= params.min_fill_ratio
        })
        .collect();
    debug!("shape filter kept {} of {} components", kept.len(), before);
    kept
}

/// Suppress near-duplicate boxes and cap the survivor count.
///
/// Survivors are walked largest-first so the most confident box wins a
/// duplicate conflict; ties order by `(min_y, min_x)` to keep the output
/// deterministic.
pub fn suppress_duplicates(
    mut components: Vec<Component>,
    params: &DetectorParams,
) -> Vec<Component> {
    components.sort_by(|a, b| {
        let area_a = a.box_width() as u64 * a.box_height() as u64;
        let area_b = b.box_width() as u64 * b.box_height() as u64;
        area_b
            .cmp(&area_a)
            .then_with(|| (a.min_y, a.min_x).cmp(&(b.min_y, b.min_x)))
    });

    let mut kept: Vec<Component> = Vec::new();
    for candidate in components {
        if kept.len() >= params.max_rooms {
            break;
        }
        let rect = candidate.rect();
        if kept
            .iter()
            .all(|k| k.rect().iou(&rect) <= params.iou_threshold)
        {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(min_x: u32, min_y: u32, w: u32, h: u32, pixel_count: u32) -> Component {
        Component {
            min_x,
            min_y,
            max_x: min_x + w - 1,
            max_y: min_y + h - 1,
            pixel_count,
        }
    }

    fn solid(min_x: u32, min_y: u32, w: u32, h: u32) -> Component {
        component(min_x, min_y, w, h, w * h)
    }

    #[test]
    fn rejects_small_sparse_and_hollow_components() {
        let params = DetectorParams::default();
        let candidates = vec![
            solid(0, 0, 15, 40),          // too narrow
            solid(0, 0, 40, 15),          // too short
            component(0, 0, 30, 30, 100), // too few pixels
            component(0, 0, 40, 40, 600), // fill 0.375 < 0.45
            solid(0, 0, 20, 20),          // 400 px, fill 1.0: keep
        ];
        let kept = filter_components(candidates, &params);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].pixel_count, 400);
    }

    #[test]
    fn fill_ratio_boundary_is_inclusive() {
        let params = DetectorParams::default();
        // 20x20 box with exactly 45% of its area filled; mass floor is met
        let boundary = component(0, 0, 20, 20, 180);
        let kept = filter_components(vec![boundary], &params);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn near_duplicates_collapse_to_the_larger_box() {
        let params = DetectorParams::default();
        let big = solid(0, 0, 100, 100);
        let dup = solid(0, 0, 98, 100); // IoU 0.98 vs big
        let other = solid(200, 0, 50, 50);
        let kept = suppress_duplicates(vec![dup, other, big], &params);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], big);
        assert_eq!(kept[1], other);
    }

    #[test]
    fn no_two_survivors_overlap_above_threshold() {
        let params = DetectorParams::default();
        let mut candidates = Vec::new();
        for i in 0..10u32 {
            candidates.push(solid(i * 2, 0, 60, 60));
        }
        let kept = suppress_duplicates(candidates, &params);
        for (i, a) in kept.iter().enumerate() {
            for b in kept.iter().skip(i + 1) {
                assert!(a.rect().iou(&b.rect()) <= params.iou_threshold);
            }
        }
    }

    #[test]
    fn survivor_cap_is_enforced() {
        let params = DetectorParams::default();
        let candidates: Vec<Component> = (0..100u32)
            .map(|i| solid((i % 10) * 30, (i / 10) * 30, 20, 20))
            .collect();
        let kept = suppress_duplicates(candidates, &params);
        assert_eq!(kept.len(), params.max_rooms);
    }

    #[test]
    fn survivors_sort_by_area_descending() {
        let params = DetectorParams::default();
        let kept = suppress_duplicates(
            vec![solid(0, 0, 20, 20), solid(300, 300, 80, 80), solid(600, 0, 40, 40)],
            &params,
        );
        let areas: Vec<u32> = kept.iter().map(|c| c.box_width() * c.box_height()).collect();
        assert_eq!(areas, vec![6400, 1600, 400]);
    }
}
