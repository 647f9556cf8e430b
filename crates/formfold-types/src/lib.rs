// formfold-types - shared data model for the formfold engine
// Field descriptors, the nested entity value tree, and upload wire types

pub mod field;
pub mod upload;
pub mod value;

pub use field::{ExtraParam, FieldDescriptor, FieldType, Rule};
pub use upload::{FileState, StoredFile, UploadResult};
pub use value::{Entity, Value};
