// File: src/upload.rs
// Purpose: Wire types for the upload collaborator (stored-file descriptors and results)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a stored file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileState {
    Uploading,
    Ready,
    Failed,
    Deleted,
}

/// Descriptor delivered by the upload collaborator on completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub content_type: String,
    pub entity_id: String,
    pub field_name: String,
    pub created_at: DateTime<Utc>,
    pub state: FileState,
}

/// An asynchronously resolved upload value, keyed by the same flat-name
/// grammar as form inputs so it merges through the same codec semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Flat field name identifying where the value lands in the entity
    pub field_name: String,

    /// Stored path written at that location
    pub stored_path: String,
}

impl UploadResult {
    pub fn new(field_name: &str, stored_path: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            stored_path: stored_path.to_string(),
        }
    }
}

impl From<&StoredFile> for UploadResult {
    fn from(stored: &StoredFile) -> Self {
        Self {
            field_name: stored.field_name.clone(),
            stored_path: stored.file_path.clone(),
        }
    }
}
