use std::fs;
use std::path::PathBuf;

use floorplan_core::FloorPlan;
use log::info;

use crate::schema::{downgrade_to_v1, into_current, FloorPlanDoc};

/// Errors from floor-plan persistence.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("invalid plan id `{0}`")]
    InvalidPlanId(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Schema(#[from] serde_json::Error),
}

/// Persistence boundary for floor plans.
///
/// `save` has upsert semantics: it creates the document when absent and
/// replaces it otherwise. Implementations accept every known schema version
/// on load and hand back the current model.
pub trait FloorPlanStore {
    fn load(&self, plan_id: &str) -> Result<Option<FloorPlan>, StoreError>;
    fn save(&self, plan_id: &str, plan: &FloorPlan) -> Result<(), StoreError>;
}

/// Reference store: one JSON document per plan id under a root directory.
pub struct JsonFileStore {
    root: PathBuf,
    legacy_schema: bool,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            legacy_schema: false,
        }
    }

    /// Write documents in the legacy V1 shape (no color/section columns),
    /// for parity with backends whose tables lack them. Loading still
    /// accepts both versions.
    pub fn with_legacy_schema(mut self) -> Self {
        self.legacy_schema = true;
        self
    }

    fn document_path(&self, plan_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !plan_id.is_empty()
            && plan_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidPlanId(plan_id.to_owned()));
        }
        Ok(self.root.join(format!("{plan_id}.json")))
    }
}

impl FloorPlanStore for JsonFileStore {
    fn load(&self, plan_id: &str) -> Result<Option<FloorPlan>, StoreError> {
        let path = self.document_path(plan_id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let doc: FloorPlanDoc = serde_json::from_str(&raw)?;
        Ok(Some(into_current(doc)))
    }

    fn save(&self, plan_id: &str, plan: &FloorPlan) -> Result<(), StoreError> {
        let path = self.document_path(plan_id)?;
        fs::create_dir_all(&self.root)?;

        let doc = if self.legacy_schema {
            FloorPlanDoc::V1(downgrade_to_v1(plan))
        } else {
            FloorPlanDoc::V2(plan.clone())
        };
        fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
        info!("saved floor plan `{plan_id}` ({} rooms)", plan.rooms.len());
        Ok(())
    }
}
