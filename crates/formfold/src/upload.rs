// File: src/upload.rs
// Purpose: Upload collaborator contract and the merge of asynchronously
// resolved upload values into the entity

use crate::codec::FieldPath;
use crate::mutator::write_path;
use chrono::Utc;
use formfold_types::{Entity, FileState, StoredFile, UploadResult, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// File content handed to the upload collaborator
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Progress callback, 0-100, non-decreasing
pub type ProgressFn = Box<dyn Fn(u8) + Send>;

/// Completion callback carrying the stored-file descriptor
pub type CompleteFn = Box<dyn FnOnce(StoredFile) + Send>;

/// Cancellation handle for an in-flight upload.
///
/// Cancellation is fire-and-forget: a transport may still deliver its
/// completion callback after `cancel`, and the merge step tolerates the
/// stale value (idempotent overwrite, last write wins).
#[derive(Debug, Clone, Default)]
pub struct UploadHandle {
    cancelled: Arc<AtomicBool>,
}

impl UploadHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The upload transport, opaque to the engine
pub trait Uploader: Send + Sync {
    fn upload(
        &self,
        entity_id: &str,
        field_name: &str,
        file: FilePayload,
        on_progress: ProgressFn,
        on_complete: CompleteFn,
    ) -> UploadHandle;
}

/// Reference transport that "stores" files under a path prefix and
/// completes inline. Used by tests and demos; cancellation only matters
/// for transports that defer completion.
#[derive(Debug, Clone)]
pub struct LocalUploader {
    root: String,
}

impl LocalUploader {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
        }
    }
}

impl Uploader for LocalUploader {
    fn upload(
        &self,
        entity_id: &str,
        field_name: &str,
        file: FilePayload,
        on_progress: ProgressFn,
        on_complete: CompleteFn,
    ) -> UploadHandle {
        let handle = UploadHandle::new();
        on_progress(100);
        on_complete(StoredFile {
            id: Uuid::new_v4(),
            file_path: format!("{}/{}/{}", self.root, entity_id, file.file_name),
            file_size: file.bytes.len() as u64,
            file_name: file.file_name,
            content_type: file.content_type,
            entity_id: entity_id.to_string(),
            field_name: field_name.to_string(),
            created_at: Utc::now(),
            state: FileState::Ready,
        });
        handle
    }
}

/// Merge resolved upload values into the entity through the same codec and
/// path-write semantics as form inputs, overwriting whatever is already at
/// each path. Results with unrecognized names are discarded.
pub fn merge_uploads(entity: &mut Entity, results: &[UploadResult], known_attributes: &[String]) {
    for result in results {
        match FieldPath::decode(&result.field_name, known_attributes) {
            Some(path) => {
                write_path(entity, &path, Value::String(result.stored_path.clone()));
            }
            None => {
                debug!(
                    field_name = %result.field_name,
                    "discarding upload result with unrecognized field name"
                );
            }
        }
    }
}
