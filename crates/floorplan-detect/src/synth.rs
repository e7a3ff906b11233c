//! Rescale surviving components into editor space and materialize rooms.

use floorplan_core::{fresh_id, snap, Rect, Room, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH};
use serde::{Deserialize, Serialize};

use crate::flood::Component;

/// Notes attached to every detection-created room, so imported seeds are
/// distinguishable from rooms the user drew.
const IMPORT_NOTE: &str = "Imported from floor plan image";

/// Where and how the synthesized rooms land in the editor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynthesisTarget {
    /// Editor canvas width the raster boxes are rescaled into.
    pub width: i32,
    /// Editor canvas height.
    pub height: i32,
    /// Rooms are named `Room {start_index + i + 1}`; pass the number of
    /// rooms already on the plan so generated names don't collide.
    pub start_index: usize,
    /// Legend entry assigned to every synthesized room.
    pub color_key: String,
    /// Section entry assigned to every synthesized room.
    pub section_key: String,
}

impl SynthesisTarget {
    pub fn new(
        width: i32,
        height: i32,
        start_index: usize,
        color_key: impl Into<String>,
        section_key: impl Into<String>,
    ) -> Self {
        Self {
            width,
            height,
            start_index,
            color_key: color_key.into(),
            section_key: section_key.into(),
        }
    }
}

/// Turn surviving components into normalized [`Room`] records.
///
/// Boxes are rescaled from working-raster space into the target canvas,
/// clamped so at least a minimum-size room stays on canvas, and snapped to
/// the editor grid. The caller decides whether the result replaces or
/// extends the current room list.
pub fn synthesize_rooms(
    components: &[Component],
    raster_width: usize,
    raster_height: usize,
    target: &SynthesisTarget,
) -> Vec<Room> {
    let scale_x = target.width as f32 / raster_width as f32;
    let scale_y = target.height as f32 / raster_height as f32;

    components
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let x = c.min_x as f32 * scale_x;
            let y = c.min_y as f32 * scale_y;
            let w = c.box_width() as f32 * scale_x;
            let h = c.box_height() as f32 * scale_y;

            let max_x = (target.width - MIN_ROOM_WIDTH).max(0) as f32;
            let max_y = (target.height - MIN_ROOM_HEIGHT).max(0) as f32;

            let rect = Rect::new(
                snap(x.clamp(0.0, max_x)),
                snap(y.clamp(0.0, max_y)),
                snap(w).max(MIN_ROOM_WIDTH),
                snap(h).max(MIN_ROOM_HEIGHT),
            );

            Room {
                id: fresh_id(),
                name: format!("Room {}", target.start_index + i + 1),
                rect,
                color_key: target.color_key.clone(),
                section_key: target.section_key.clone(),
                notes: IMPORT_NOTE.to_owned(),
                pins: Vec::new(),
            }
        })
        .collect()
}
