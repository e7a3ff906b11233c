use std::time::Duration;

use crate::store::StoreError;

/// A signed, time-limited upload slot for a source image.
#[derive(Clone, Debug)]
pub struct SignedUpload {
    /// URL the client PUTs the image bytes to.
    pub upload_url: String,
    /// Storage path to persist as the plan's `reference_image_path`.
    pub storage_path: String,
    pub expires_in: Duration,
}

/// Signed-URL issuing service for floor-plan source images.
///
/// The detector never sees URLs or storage paths; it consumes decoded
/// bitmaps only. This trait is the boundary an object-storage backend
/// implements; no implementation ships in this workspace.
pub trait ImageStorage {
    /// Issue an upload slot for a new source image of the given plan.
    fn signed_upload(&self, plan_id: &str, file_name: &str) -> Result<SignedUpload, StoreError>;

    /// Issue a time-limited read URL for a stored image path.
    fn signed_url(&self, storage_path: &str) -> Result<String, StoreError>;
}
