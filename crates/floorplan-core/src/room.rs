use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::geom::{snap, Rect, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH};
use crate::id::fresh_id;
use crate::legend::{ColorLegend, HouseSections};

/// An annotation pin inside a room.
///
/// The position is normalized to the room's own bounding box (`[0, 1]²`),
/// not to the canvas, so pins stay in place when the room is dragged or
/// resized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: String,
    pub position: Point2<f32>,
    #[serde(default)]
    pub note: String,
}

impl Pin {
    pub fn new(position: Point2<f32>, note: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            position,
            note: note.into(),
        }
    }
}

/// One room on the floor plan.
///
/// Invariants (enforced by [`normalize_room`] and by the editor operations
/// in [`crate::FloorPlan`]): position and size are grid multiples, size is
/// at least `MIN_ROOM_WIDTH × MIN_ROOM_HEIGHT`, `color_key` and
/// `section_key` reference live legend/section entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub rect: Rect,
    pub color_key: String,
    pub section_key: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl Room {
    /// Build a room with a fresh id. The rect is normalized on insertion
    /// into a [`crate::FloorPlan`], not here.
    pub fn new(
        name: impl Into<String>,
        rect: Rect,
        color_key: impl Into<String>,
        section_key: impl Into<String>,
    ) -> Self {
        Self {
            id: fresh_id(),
            name: name.into(),
            rect,
            color_key: color_key.into(),
            section_key: section_key.into(),
            notes: String::new(),
            pins: Vec::new(),
        }
    }
}

/// Repair a room record in place.
///
/// Any malformed or out-of-range field coming from persistence or from
/// detection is clamped or defaulted rather than rejected, so a corrupt
/// stored record can never crash the editor. Applying the repair twice
/// changes nothing.
pub fn normalize_room(room: &mut Room, legend: &ColorLegend, sections: &HouseSections) {
    if room.id.is_empty() {
        room.id = fresh_id();
    }
    if room.name.is_empty() {
        room.name = "Room".to_owned();
    }

    room.rect.x = snap(room.rect.x.max(0) as f32);
    room.rect.y = snap(room.rect.y.max(0) as f32);
    room.rect.width = snap(room.rect.width as f32).max(MIN_ROOM_WIDTH);
    room.rect.height = snap(room.rect.height as f32).max(MIN_ROOM_HEIGHT);

    if !legend.contains(&room.color_key) {
        room.color_key = legend.first_id().to_owned();
    }
    if !sections.contains(&room.section_key) {
        room.section_key = sections.first_id().to_owned();
    }

    for pin in &mut room.pins {
        if pin.id.is_empty() {
            pin.id = fresh_id();
        }
        pin.position.x = clamp_unit(pin.position.x);
        pin.position.y = clamp_unit(pin.position.y);
    }
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.5
    }
}
