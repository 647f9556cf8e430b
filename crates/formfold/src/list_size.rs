// File: src/list_size.rs
// Purpose: Tracks how many rows each list-typed field currently exposes,
// independent of how many rows actually hold data

use formfold_types::{Entity, FieldDescriptor, Value};
use std::collections::HashMap;

/// Upper bound on rendered rows per list field
pub const MAX_ROWS: usize = 10;

/// A list field never shrinks below one visible row
pub const MIN_ROWS: usize = 1;

/// Row counts keyed by attribute. Non-list attributes are simply absent,
/// which reads as zero.
#[derive(Debug, Clone, Default)]
pub struct ListSizes {
    sizes: HashMap<String, usize>,
}

impl ListSizes {
    /// Derive initial sizes from the entity's existing array lengths.
    pub fn initialize(descriptors: &[FieldDescriptor], entity: &Entity) -> Self {
        let mut sizes = HashMap::new();
        for descriptor in descriptors.iter().filter(|d| d.kind.is_list()) {
            let existing = entity
                .get(&descriptor.attribute)
                .and_then(Value::as_array)
                .map(|rows| rows.len().min(MAX_ROWS))
                .unwrap_or(0);
            sizes.insert(descriptor.attribute.clone(), existing);
        }
        Self { sizes }
    }

    pub fn get(&self, attribute: &str) -> usize {
        self.sizes.get(attribute).copied().unwrap_or(0)
    }

    /// Add one row, capped at MAX_ROWS
    pub fn grow(&mut self, attribute: &str) {
        let size = self.sizes.entry(attribute.to_string()).or_insert(0);
        *size = (*size + 1).min(MAX_ROWS);
    }

    /// Remove one row, floored at MIN_ROWS
    pub fn shrink(&mut self, attribute: &str) {
        let size = self.sizes.entry(attribute.to_string()).or_insert(MIN_ROWS);
        *size = size.saturating_sub(1).max(MIN_ROWS);
    }

    /// Whether a decoded row index refers to a currently rendered row.
    /// Indices failing this check belong to stale/removed rows.
    pub fn bounds_check(&self, attribute: &str, index: usize) -> bool {
        index < self.get(attribute)
    }
}
