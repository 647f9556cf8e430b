// File: src/mutator.rs
// Purpose: Folds decoded (name, value) edits onto a working entity - container
// creation, type-specific value transforms, and list pruning/normalization

use crate::codec::FieldPath;
use crate::list_size::ListSizes;
use formfold_types::{Entity, FieldDescriptor, FieldType, Value};
use std::collections::HashMap;
use tracing::debug;

/// Raw value carried by one form control
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Text(String),
    Toggle(bool),
}

/// One flat input as collected from the form surface.
///
/// `selected` matters only for radio groups: every control in the group
/// submits under the same name and only the selected one may write.
#[derive(Debug, Clone)]
pub struct RawInput {
    pub name: String,
    pub value: InputValue,
    pub selected: bool,
}

impl RawInput {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: InputValue::Text(value.to_string()),
            selected: true,
        }
    }

    pub fn radio(name: &str, value: &str, selected: bool) -> Self {
        Self {
            name: name.to_string(),
            value: InputValue::Text(value.to_string()),
            selected,
        }
    }

    pub fn toggle(name: &str, on: bool) -> Self {
        Self {
            name: name.to_string(),
            value: InputValue::Toggle(on),
            selected: true,
        }
    }
}

/// One entry of the ordered edit log produced by decoding
#[derive(Debug, Clone)]
pub struct FieldEdit {
    pub path: FieldPath,
    pub value: InputValue,
}

/// Decode the flat input set into an ordered edit log.
///
/// Drops, without error: names matching no participating attribute,
/// unselected radio controls, checkbox fields (overwritten from tracked
/// state at finalize time), and list rows whose index is out of bounds
/// for the currently rendered row count.
pub fn decode_inputs(
    inputs: &[RawInput],
    descriptors: &[FieldDescriptor],
    sizes: &ListSizes,
) -> Vec<FieldEdit> {
    let participating: Vec<&FieldDescriptor> =
        descriptors.iter().filter(|d| d.condition).collect();
    let known: Vec<String> = participating
        .iter()
        .map(|d| d.attribute.clone())
        .collect();
    let by_attribute: HashMap<&str, &FieldDescriptor> = participating
        .iter()
        .map(|d| (d.attribute.as_str(), *d))
        .collect();

    let mut edits = Vec::new();
    for input in inputs {
        let Some(path) = FieldPath::decode(&input.name, &known) else {
            debug!(name = %input.name, "discarding input with unrecognized name");
            continue;
        };

        // Decode is total over known attributes, so the lookup cannot miss.
        let Some(descriptor) = by_attribute.get(path.attribute()) else {
            continue;
        };

        if descriptor.kind == FieldType::Checkbox {
            continue;
        }
        if descriptor.kind == FieldType::Radio && !input.selected {
            continue;
        }
        if let Some(index) = path.index() {
            if !sizes.bounds_check(path.attribute(), index) {
                debug!(
                    name = %input.name,
                    index,
                    "discarding stale list row beyond the rendered size"
                );
                continue;
            }
        }

        edits.push(FieldEdit {
            path,
            value: input.value.clone(),
        });
    }
    edits
}

/// Fold the edit log onto the entity in order (last write wins).
pub fn fold_edits(entity: &mut Entity, edits: &[FieldEdit]) {
    for edit in edits {
        let value = transform(&edit.path, &edit.value);
        write_path(entity, &edit.path, value);
    }
}

/// Type-specific value transform applied before a write.
///
/// Multiline text, and the `content` sub-field regardless of its current
/// shape, become a sequence of non-empty lines.
fn transform(path: &FieldPath, value: &InputValue) -> Value {
    match value {
        InputValue::Toggle(on) => Value::Bool(*on),
        InputValue::Text(text) => {
            let is_content = matches!(
                path,
                FieldPath::Subfield { subfield, .. } if subfield == "content"
            );
            if text.contains('\n') || is_content {
                Value::Array(
                    text.lines()
                        .filter(|line| !line.is_empty())
                        .map(Value::from)
                        .collect(),
                )
            } else {
                Value::String(text.clone())
            }
        }
    }
}

/// Write a value at a decoded path, creating intermediate containers as
/// needed. Sparse list writes pad with Null; pruning drops the padding.
pub fn write_path(entity: &mut Entity, path: &FieldPath, value: Value) {
    match path {
        FieldPath::Attribute { attribute } => {
            entity.set(attribute, value);
        }
        FieldPath::Subfield {
            attribute,
            subfield,
        } => {
            entity
                .object_mut(attribute)
                .insert(subfield.clone(), value);
        }
        FieldPath::ListRow { attribute, index } => {
            let rows = entity.array_mut(attribute);
            while rows.len() <= *index {
                rows.push(Value::Null);
            }
            rows[*index] = value;
        }
        FieldPath::PairedRow {
            attribute,
            index,
            slot,
        } => {
            // Paired rows only have slots 0 and 1; anything else is dropped
            // the same way decode drops it.
            if *slot > 1 {
                debug!(attribute = %attribute, slot, "discarding write to out-of-range pair slot");
                return;
            }
            let rows = entity.array_mut(attribute);
            while rows.len() <= *index {
                rows.push(Value::Null);
            }
            if !matches!(&rows[*index], Value::Array(pair) if pair.len() == 2) {
                rows[*index] = Value::Array(vec![Value::Null, Value::Null]);
            }
            if let Value::Array(pair) = &mut rows[*index] {
                pair[*slot] = value;
            }
        }
    }
}

/// Prune every list field to the currently rendered size and, for paired
/// lists, to rows with both slots present; normalize to a dense sequence.
/// Running this on an already-pruned entity is a no-op.
pub fn prune_lists(entity: &mut Entity, descriptors: &[FieldDescriptor], sizes: &ListSizes) {
    for descriptor in descriptors
        .iter()
        .filter(|d| d.condition && d.kind.is_list())
    {
        let size = sizes.get(&descriptor.attribute);
        let Some(rows) = entity.get(&descriptor.attribute).and_then(Value::as_array) else {
            continue;
        };

        let kept: Vec<Value> = rows
            .iter()
            .enumerate()
            .filter(|(index, row)| *index < size && row_complete(descriptor.kind, row))
            .map(|(_, row)| row.clone())
            .collect();

        entity.set(&descriptor.attribute, Value::Array(kept));
    }
}

fn row_complete(kind: FieldType, row: &Value) -> bool {
    match kind {
        FieldType::DoubleTextList => match row {
            Value::Array(pair) => {
                pair.len() == 2 && pair[0].is_present() && pair[1].is_present()
            }
            _ => false,
        },
        // Null marks a padded slot that was never written
        _ => !row.is_null(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_field(attribute: &str) -> FieldDescriptor {
        FieldDescriptor::new(attribute, attribute, FieldType::Text)
    }

    fn list_field(attribute: &str, kind: FieldType) -> FieldDescriptor {
        FieldDescriptor::new(attribute, attribute, kind)
    }

    fn sized(attribute: &str, size: usize) -> ListSizes {
        let mut sizes = ListSizes::default();
        for _ in 0..size {
            sizes.grow(attribute);
        }
        sizes
    }

    #[test]
    fn test_decode_drops_unknown_and_unselected() {
        let descriptors = vec![
            text_field("title"),
            FieldDescriptor::new("plan", "Plan", FieldType::Radio),
            FieldDescriptor::new("agree", "Agree", FieldType::Checkbox),
        ];
        let inputs = vec![
            RawInput::text("title", "hello"),
            RawInput::text("bogus", "ignored"),
            RawInput::radio("plan", "basic", false),
            RawInput::radio("plan", "pro", true),
            RawInput::toggle("agree", true),
        ];

        let edits = decode_inputs(&inputs, &descriptors, &ListSizes::default());
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].path.attribute(), "title");
        assert_eq!(edits[1].path.attribute(), "plan");
        assert_eq!(edits[1].value, InputValue::Text("pro".to_string()));
    }

    #[test]
    fn test_decode_drops_out_of_bounds_rows() {
        let descriptors = vec![list_field("pills", FieldType::PillList)];
        let inputs = vec![
            RawInput::text("pills_listfieldsingleidx_0", "A"),
            RawInput::text("pills_listfieldsingleidx_1", "B"),
            RawInput::text("pills_listfieldsingleidx_5", "stale"),
        ];

        let edits = decode_inputs(&inputs, &descriptors, &sized("pills", 2));
        assert_eq!(edits.len(), 2);
    }

    #[test]
    fn test_decode_skips_non_participating_fields() {
        let descriptors = vec![text_field("title").condition(false)];
        let edits = decode_inputs(
            &[RawInput::text("title", "hello")],
            &descriptors,
            &ListSizes::default(),
        );
        assert!(edits.is_empty());
    }

    #[test]
    fn test_fold_scalar_and_subfield_writes() {
        let descriptors = vec![
            text_field("title"),
            FieldDescriptor::new("address", "Address", FieldType::Address),
        ];
        let inputs = vec![
            RawInput::text("title", "hello"),
            RawInput::text("address_city", "Seoul"),
            RawInput::text("address_zip_code", "04524"),
        ];

        let mut entity = Entity::new();
        let edits = decode_inputs(&inputs, &descriptors, &ListSizes::default());
        fold_edits(&mut entity, &edits);

        assert_eq!(entity.get("title"), Some(&Value::from("hello")));
        let address = entity.get("address").and_then(Value::as_object).unwrap();
        assert_eq!(address.get("city"), Some(&Value::from("Seoul")));
        assert_eq!(address.get("zip_code"), Some(&Value::from("04524")));
    }

    #[test]
    fn test_multiline_text_splits_into_lines() {
        let mut entity = Entity::new();
        let edits = decode_inputs(
            &[RawInput::text("notes", "one\n\ntwo\nthree")],
            &[text_field("notes")],
            &ListSizes::default(),
        );
        fold_edits(&mut entity, &edits);

        assert_eq!(
            entity.get("notes"),
            Some(&Value::Array(vec!["one".into(), "two".into(), "three".into()]))
        );
    }

    #[test]
    fn test_content_subfield_always_splits() {
        let mut entity = Entity::new();
        let edits = decode_inputs(
            &[RawInput::text("article_content", "single line")],
            &[FieldDescriptor::new("article", "Article", FieldType::Article)],
            &ListSizes::default(),
        );
        fold_edits(&mut entity, &edits);

        let article = entity.get("article").and_then(Value::as_object).unwrap();
        assert_eq!(
            article.get("content"),
            Some(&Value::Array(vec!["single line".into()]))
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut entity = Entity::new();
        let edits = decode_inputs(
            &[
                RawInput::text("title", "first"),
                RawInput::text("title", "second"),
            ],
            &[text_field("title")],
            &ListSizes::default(),
        );
        fold_edits(&mut entity, &edits);
        assert_eq!(entity.get("title"), Some(&Value::from("second")));
    }

    #[test]
    fn test_prune_drops_out_of_range_and_padding() {
        let descriptors = vec![list_field("pills", FieldType::PillList)];
        let mut entity = Entity::new();
        // Sparse write: index 2 written, 0 and 1 padded with Null
        write_path(
            &mut entity,
            &FieldPath::ListRow {
                attribute: "pills".to_string(),
                index: 2,
            },
            "C".into(),
        );
        write_path(
            &mut entity,
            &FieldPath::ListRow {
                attribute: "pills".to_string(),
                index: 0,
            },
            "A".into(),
        );

        prune_lists(&mut entity, &descriptors, &sized("pills", 2));
        // Index 2 is beyond the rendered size, the Null at 1 was never written
        assert_eq!(entity.get("pills"), Some(&Value::Array(vec!["A".into()])));
    }

    #[test]
    fn test_write_ignores_out_of_range_pair_slot() {
        let mut entity = Entity::new();
        write_path(
            &mut entity,
            &FieldPath::PairedRow {
                attribute: "faq".to_string(),
                index: 0,
                slot: 2,
            },
            "lost".into(),
        );
        assert!(entity.get("faq").is_none(), "nothing is written");

        // An in-range write to the same row is unaffected
        write_path(
            &mut entity,
            &FieldPath::PairedRow {
                attribute: "faq".to_string(),
                index: 0,
                slot: 0,
            },
            "Q1".into(),
        );
        assert_eq!(
            entity.get("faq"),
            Some(&Value::Array(vec![Value::Array(vec![
                "Q1".into(),
                Value::Null
            ])]))
        );
    }

    #[test]
    fn test_prune_double_list_requires_both_slots() {
        let descriptors = vec![list_field("faq", FieldType::DoubleTextList)];
        let mut entity = Entity::new();
        let edits = decode_inputs(
            &[
                RawInput::text("faq_listfieldidx_0_0", "Q1"),
                RawInput::text("faq_listfieldidx_0_1", "A1"),
                RawInput::text("faq_listfieldidx_1_0", "Q2 without answer"),
            ],
            &descriptors,
            &sized("faq", 2),
        );
        fold_edits(&mut entity, &edits);
        prune_lists(&mut entity, &descriptors, &sized("faq", 2));

        assert_eq!(
            entity.get("faq"),
            Some(&Value::Array(vec![Value::Array(vec![
                "Q1".into(),
                "A1".into()
            ])]))
        );
    }

    #[test]
    fn test_prune_is_idempotent() {
        let descriptors = vec![list_field("pills", FieldType::PillList)];
        let sizes = sized("pills", 2);
        let mut entity = Entity::from_json(serde_json::json!({
            "pills": ["A", "B", "C", "D"]
        }));

        prune_lists(&mut entity, &descriptors, &sizes);
        let once = entity.clone();
        prune_lists(&mut entity, &descriptors, &sizes);

        assert_eq!(entity, once);
        assert_eq!(
            entity.get("pills"),
            Some(&Value::Array(vec!["A".into(), "B".into()]))
        );
    }
}
