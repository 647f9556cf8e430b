// formfold - renders a data entity as a flat set of named inputs and folds
// submitted values back into validated nested structure.
//
// The engine decodes flat field names through a single codec, folds an
// ordered edit log onto a working entity, merges asynchronously resolved
// upload values through the same path semantics, prunes list rows against
// the tracked row counts, and runs the rule catalog plus the composite
// completeness validators - failing fast on the first violation.

pub mod codec;
pub mod list_size;
pub mod mutator;
pub mod submit;
pub mod upload;

// Re-export the data model and validation surface
pub use formfold_types::{
    Entity, ExtraParam, FieldDescriptor, FieldType, FileState, Rule, StoredFile, UploadResult,
    Value,
};
pub use formfold_validation::{
    chars_remaining, message, validate, validate_article, validate_showcase, Violation,
};

pub use codec::FieldPath;
pub use list_size::{ListSizes, MAX_ROWS, MIN_ROWS};
pub use mutator::{decode_inputs, fold_edits, prune_lists, write_path, FieldEdit, InputValue, RawInput};
pub use submit::{ErrorSink, FormSession, SubmitError, SubmitPhase};
pub use upload::{merge_uploads, FilePayload, LocalUploader, UploadHandle, Uploader};
