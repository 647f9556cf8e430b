// File: src/codec.rs
// Purpose: Field-name codec - encodes an entity attribute path into a flat
// control name and decodes a flat name back against the declared attribute set

/// Literal token separating a paired list row from its attribute
const LIST_PAIR_TOKEN: &str = "listfieldidx_";

/// Literal token separating a single-value list row from its attribute
const LIST_SINGLE_TOKEN: &str = "listfieldsingleidx_";

/// A decoded entity attribute path for one leaf value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// The bare attribute
    Attribute { attribute: String },

    /// A fixed sub-field of the attribute (e.g. an address `city`, an
    /// article `title`). The sub-field may itself contain underscores.
    Subfield { attribute: String, subfield: String },

    /// One row of a single-value list field
    ListRow { attribute: String, index: usize },

    /// One slot of a paired list row (slot 0 = question, slot 1 = answer)
    PairedRow {
        attribute: String,
        index: usize,
        slot: usize,
    },
}

impl FieldPath {
    pub fn attribute(&self) -> &str {
        match self {
            FieldPath::Attribute { attribute }
            | FieldPath::Subfield { attribute, .. }
            | FieldPath::ListRow { attribute, .. }
            | FieldPath::PairedRow { attribute, .. } => attribute,
        }
    }

    /// Row index for list paths, None otherwise
    pub fn index(&self) -> Option<usize> {
        match self {
            FieldPath::ListRow { index, .. } | FieldPath::PairedRow { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Encode the path as a flat control name
    pub fn encode(&self) -> String {
        match self {
            FieldPath::Attribute { attribute } => attribute.clone(),
            FieldPath::Subfield {
                attribute,
                subfield,
            } => format!("{}_{}", attribute, subfield),
            FieldPath::ListRow { attribute, index } => {
                format!("{}_{}{}", attribute, LIST_SINGLE_TOKEN, index)
            }
            FieldPath::PairedRow {
                attribute,
                index,
                slot,
            } => format!("{}_{}{}_{}", attribute, LIST_PAIR_TOKEN, index, slot),
        }
    }

    /// Decode a flat control name against the declared attribute set.
    ///
    /// Attribute names may themselves contain underscores, so the attribute
    /// is recovered by longest-prefix match against `known_attributes`
    /// rather than a fixed split position. Names that match no declared
    /// attribute decode to `None` and are discarded by the caller.
    pub fn decode(name: &str, known_attributes: &[String]) -> Option<FieldPath> {
        let attribute = known_attributes
            .iter()
            .filter(|a| {
                name == a.as_str()
                    || (name.len() > a.len()
                        && name.starts_with(a.as_str())
                        && name.as_bytes()[a.len()] == b'_')
            })
            .max_by_key(|a| a.len())?
            .clone();

        if name == attribute {
            return Some(FieldPath::Attribute { attribute });
        }

        let suffix = &name[attribute.len() + 1..];

        if let Some(rest) = suffix.strip_prefix(LIST_SINGLE_TOKEN) {
            let index = rest.parse().ok()?;
            return Some(FieldPath::ListRow { attribute, index });
        }

        if let Some(rest) = suffix.strip_prefix(LIST_PAIR_TOKEN) {
            let (index, slot) = rest.split_once('_')?;
            let index = index.parse().ok()?;
            let slot: usize = slot.parse().ok()?;
            if slot > 1 {
                return None;
            }
            return Some(FieldPath::PairedRow {
                attribute,
                index,
                slot,
            });
        }

        Some(FieldPath::Subfield {
            attribute,
            subfield: suffix.to_string(),
        })
    }
}
