//! Versioned wire schema for persisted floor plans.
//!
//! The document version is an explicit tag, not a guess from missing
//! columns: a loader matches on the tagged union and runs a pure migration,
//! instead of sniffing error strings to decide whether the backing table
//! has color/section columns.

use floorplan_core::{FloorPlan, Pin, Rect, Room};
use serde::{Deserialize, Serialize};

/// A persisted floor-plan document, any known schema version.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
pub enum FloorPlanDoc {
    /// Legacy shape: rooms without color/section columns, no legend or
    /// sections. Still accepted on load, and still producible on save for
    /// backends whose tables lack the newer columns.
    V1(DocV1),
    /// Current shape: the full editor model.
    V2(FloorPlan),
}

/// Legacy room row: geometry and annotations only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomV1 {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

/// Legacy document body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DocV1 {
    #[serde(default)]
    pub rooms: Vec<RoomV1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image_path: Option<String>,
}

/// Migrate a legacy document to the current model.
///
/// Pure: rooms keep their ids and geometry; the missing color/section keys
/// default to the first entry of a fresh legend/sections pair, and the
/// result is normalized so legacy out-of-grid geometry is repaired on the
/// way in.
pub fn migrate_v1(doc: DocV1) -> FloorPlan {
    let mut plan = FloorPlan::new();
    plan.reference_image_path = doc.reference_image_path;
    let color = plan.legend.first_id().to_owned();
    let section = plan.sections.first_id().to_owned();

    plan.rooms = doc
        .rooms
        .into_iter()
        .map(|r| Room {
            id: r.id,
            name: r.name,
            rect: r.rect,
            color_key: color.clone(),
            section_key: section.clone(),
            notes: r.notes,
            pins: r.pins,
        })
        .collect();

    plan.normalize();
    plan
}

/// Strip a plan down to the legacy shape (for backends without the
/// color/section columns). Lossy: legend, sections and key assignments are
/// dropped, geometry and pins survive.
pub fn downgrade_to_v1(plan: &FloorPlan) -> DocV1 {
    DocV1 {
        rooms: plan
            .rooms
            .iter()
            .map(|r| RoomV1 {
                id: r.id.clone(),
                name: r.name.clone(),
                rect: r.rect,
                notes: r.notes.clone(),
                pins: r.pins.clone(),
            })
            .collect(),
        reference_image_path: plan.reference_image_path.clone(),
    }
}

/// Resolve any document version to the current model.
pub fn into_current(doc: FloorPlanDoc) -> FloorPlan {
    match doc {
        FloorPlanDoc::V1(v1) => migrate_v1(v1),
        FloorPlanDoc::V2(mut plan) => {
            plan.normalize();
            plan
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_documents_parse_and_migrate() {
        let json = r#"{
            "schema": "v1",
            "rooms": [
                { "id": "r1", "name": "Kitchen", "x": 43, "y": -20, "width": 7, "height": 200 }
            ],
            "reference_image_path": "plans/42.png"
        }"#;
        let doc: FloorPlanDoc = serde_json::from_str(json).unwrap();
        let plan = into_current(doc);

        assert_eq!(plan.rooms.len(), 1);
        let room = &plan.rooms[0];
        assert_eq!(room.id, "r1");
        assert_eq!(room.color_key, plan.legend.first_id());
        assert_eq!(room.section_key, plan.sections.first_id());
        // legacy geometry is repaired onto the grid
        assert_eq!(room.rect.x, 40);
        assert_eq!(room.rect.y, 0);
        assert_eq!(plan.reference_image_path.as_deref(), Some("plans/42.png"));
    }

    #[test]
    fn migration_is_stable_under_renormalization() {
        let doc = DocV1 {
            rooms: vec![RoomV1 {
                id: "r1".into(),
                name: "Bath".into(),
                rect: Rect::new(13, 27, 55, 41),
                notes: String::new(),
                pins: Vec::new(),
            }],
            reference_image_path: None,
        };
        let mut plan = migrate_v1(doc);
        let once = plan.clone();
        plan.normalize();
        assert_eq!(plan, once);
    }

    #[test]
    fn v2_round_trips_through_the_tagged_union() {
        let mut plan = FloorPlan::new();
        let color = plan.legend.first_id().to_owned();
        let section = plan.sections.first_id().to_owned();
        plan.add_room(Room::new("Office", Rect::new(0, 0, 120, 100), color, section));

        let json = serde_json::to_string(&FloorPlanDoc::V2(plan.clone())).unwrap();
        assert!(json.contains(r#""schema":"v2""#));
        let back = into_current(serde_json::from_str(&json).unwrap());
        assert_eq!(back, plan);
    }

    #[test]
    fn downgrade_drops_keys_but_keeps_geometry() {
        let mut plan = FloorPlan::new();
        let color = plan.legend.first_id().to_owned();
        let section = plan.sections.first_id().to_owned();
        let id = plan.add_room(Room::new("Den", Rect::new(40, 60, 160, 120), color, section));

        let v1 = downgrade_to_v1(&plan);
        assert_eq!(v1.rooms.len(), 1);
        assert_eq!(v1.rooms[0].id, id);
        assert_eq!(v1.rooms[0].rect, Rect::new(40, 60, 160, 120));

        let json = serde_json::to_string(&FloorPlanDoc::V1(v1)).unwrap();
        assert!(!json.contains("color_key"));
        assert!(!json.contains("section_key"));
    }
}
