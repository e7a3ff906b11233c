use serde::{Deserialize, Serialize};

use crate::geom::{snap, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH};
use crate::legend::{ColorLegend, HouseSections, ModelError};
use crate::room::{normalize_room, Room};

/// What to do with the existing room list when detection results arrive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DetectMerge {
    /// Drop the current rooms and use the detected ones.
    Replace,
    /// Keep the current rooms and add the detected ones after them.
    Append,
}

/// In-memory editor state for one floor plan.
///
/// The session exclusively owns the room/pin/legend/section collections;
/// persistence and detection hand complete values in and out but never
/// mutate this state directly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub rooms: Vec<Room>,
    pub legend: ColorLegend,
    pub sections: HouseSections,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image_path: Option<String>,
}

impl FloorPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize every room against the current legend and sections.
    /// Called after loading from persistence and after merges.
    pub fn normalize(&mut self) {
        for room in &mut self.rooms {
            normalize_room(room, &self.legend, &self.sections);
        }
    }

    /// Index detection should start numbering new rooms from, so generated
    /// names do not collide with rooms already on the plan.
    #[inline]
    pub fn next_room_index(&self) -> usize {
        self.rooms.len()
    }

    /// Insert a room (normalized first) and return its id.
    pub fn add_room(&mut self, mut room: Room) -> String {
        normalize_room(&mut room, &self.legend, &self.sections);
        let id = room.id.clone();
        self.rooms.push(room);
        id
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    /// Remove a room. Returns `false` when the id is unknown.
    pub fn remove_room(&mut self, id: &str) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|r| r.id != id);
        self.rooms.len() != before
    }

    /// Drag a room to a new position. The position is snapped to the grid;
    /// negative coordinates clamp to the canvas origin.
    pub fn move_room(&mut self, id: &str, x: f32, y: f32) -> bool {
        match self.room_mut(id) {
            Some(room) => {
                room.rect.x = snap(x.max(0.0));
                room.rect.y = snap(y.max(0.0));
                true
            }
            None => false,
        }
    }

    /// Resize a room. The size is snapped to the grid and floored at the
    /// minimum room dimensions.
    pub fn resize_room(&mut self, id: &str, width: f32, height: f32) -> bool {
        match self.room_mut(id) {
            Some(room) => {
                room.rect.width = snap(width).max(MIN_ROOM_WIDTH);
                room.rect.height = snap(height).max(MIN_ROOM_HEIGHT);
                true
            }
            None => false,
        }
    }

    /// Remove a legend entry and reassign any room that referenced it to
    /// the new first entry.
    pub fn remove_legend_entry(&mut self, id: &str) -> Result<(), ModelError> {
        self.legend.remove(id)?;
        let fallback = self.legend.first_id().to_owned();
        for room in &mut self.rooms {
            if room.color_key == id {
                room.color_key = fallback.clone();
            }
        }
        Ok(())
    }

    /// Remove a section entry and reassign any room that referenced it to
    /// the new first entry.
    pub fn remove_section_entry(&mut self, id: &str) -> Result<(), ModelError> {
        self.sections.remove(id)?;
        let fallback = self.sections.first_id().to_owned();
        for room in &mut self.rooms {
            if room.section_key == id {
                room.section_key = fallback.clone();
            }
        }
        Ok(())
    }

    /// Merge detection output into the plan. The caller has already asked
    /// the user whether to replace or append.
    pub fn apply_detected(&mut self, detected: Vec<Room>, merge: DetectMerge) {
        match merge {
            DetectMerge::Replace => self.rooms = detected,
            DetectMerge::Append => self.rooms.extend(detected),
        }
        self.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Rect, GRID};

    fn plan_with_room() -> (FloorPlan, String) {
        let mut plan = FloorPlan::new();
        let color = plan.legend.first_id().to_owned();
        let section = plan.sections.first_id().to_owned();
        let id = plan.add_room(Room::new("Kitchen", Rect::new(40, 40, 200, 160), color, section));
        (plan, id)
    }

    #[test]
    fn move_and_resize_stay_on_grid() {
        let (mut plan, id) = plan_with_room();
        assert!(plan.move_room(&id, 133.0, -50.0));
        assert!(plan.resize_room(&id, 11.0, 207.0));

        let room = plan.room(&id).unwrap();
        assert_eq!(room.rect.x % GRID, 0);
        assert_eq!(room.rect.y, 0);
        assert_eq!(room.rect.width, MIN_ROOM_WIDTH);
        assert_eq!(room.rect.height % GRID, 0);
        assert!(room.rect.height >= MIN_ROOM_HEIGHT);
    }

    #[test]
    fn legend_removal_reassigns_and_is_idempotent() {
        let (mut plan, id) = plan_with_room();
        let doomed = plan.legend.add("Deep clean", Some("#fda4af".to_owned()));
        plan.room_mut(&id).unwrap().color_key = doomed.clone();

        plan.remove_legend_entry(&doomed).unwrap();
        let first = plan.legend.first_id().to_owned();
        assert_eq!(plan.room(&id).unwrap().color_key, first);

        // repairing again changes nothing
        let before = plan.clone();
        plan.normalize();
        assert_eq!(plan, before);
    }

    #[test]
    fn section_removal_reassigns_rooms() {
        let (mut plan, id) = plan_with_room();
        let doomed = plan.sections.add("Annex");
        plan.room_mut(&id).unwrap().section_key = doomed.clone();
        plan.remove_section_entry(&doomed).unwrap();
        assert_eq!(
            plan.room(&id).unwrap().section_key,
            plan.sections.first_id()
        );
    }

    #[test]
    fn apply_detected_replace_and_append() {
        let (mut plan, _) = plan_with_room();
        let color = plan.legend.first_id().to_owned();
        let section = plan.sections.first_id().to_owned();
        let detected = vec![
            Room::new("Room 2", Rect::new(0, 0, 100, 100), color.clone(), section.clone()),
            Room::new("Room 3", Rect::new(300, 0, 120, 80), color.clone(), section.clone()),
        ];

        let mut appended = plan.clone();
        appended.apply_detected(detected.clone(), DetectMerge::Append);
        assert_eq!(appended.rooms.len(), 3);

        plan.apply_detected(detected, DetectMerge::Replace);
        assert_eq!(plan.rooms.len(), 2);
        // merged rooms are normalized on the way in
        for room in &plan.rooms {
            assert_eq!(room.rect.width % GRID, 0);
            assert!(room.rect.width >= MIN_ROOM_WIDTH);
        }
    }

    #[test]
    fn remove_room_by_id() {
        let (mut plan, id) = plan_with_room();
        assert!(plan.remove_room(&id));
        assert!(!plan.remove_room(&id));
        assert!(plan.rooms.is_empty());
    }
}
