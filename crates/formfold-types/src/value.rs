// File: src/value.rs
// Purpose: Nested entity value tree the decode/merge/validate engine operates on

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value stored at one node of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
}

impl Value {
    /// Convert value to string for display
    pub fn display_string(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => {
                // Format number nicely (remove .0 for integers)
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::String(s) => s.clone(),
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(|v| v.display_string()).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Object(_) => "[Object]".to_string(),
            Value::Null => "".to_string(),
        }
    }

    /// Convert value to boolean (truthiness)
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(arr) => !arr.is_empty(),
            Value::Object(obj) => !obj.is_empty(),
            Value::Null => false,
        }
    }

    /// Whether the value counts as "provided" for completeness checks.
    /// Strings must be non-empty after trimming.
    pub fn is_present(&self) -> bool {
        match self {
            Value::String(s) => !s.trim().is_empty(),
            other => other.is_truthy(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Convert from a serde_json value
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(obj: HashMap<String, Value>) -> Self {
        Value::Object(obj)
    }
}

/// The entity being edited: an open-ended map from attribute names to values.
///
/// No attribute is required to pre-exist; intermediate containers are created
/// lazily on first write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    attributes: HashMap<String, Value>,
}

impl Entity {
    /// Create an empty entity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a serde_json object; non-object JSON yields an empty entity
    pub fn from_json(json: serde_json::Value) -> Self {
        match Value::from_json(json) {
            Value::Object(attributes) => Self { attributes },
            _ => Self::default(),
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    pub fn set(&mut self, attribute: &str, value: Value) {
        self.attributes.insert(attribute.to_string(), value);
    }

    pub fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.attributes.remove(attribute)
    }

    pub fn has(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Get the object stored at `attribute`, replacing whatever is there with
    /// an empty object if it is absent or not an object.
    pub fn object_mut(&mut self, attribute: &str) -> &mut HashMap<String, Value> {
        let slot = self
            .attributes
            .entry(attribute.to_string())
            .or_insert_with(|| Value::Object(HashMap::new()));
        if !matches!(slot, Value::Object(_)) {
            *slot = Value::Object(HashMap::new());
        }
        match slot {
            Value::Object(obj) => obj,
            _ => unreachable!(),
        }
    }

    /// Get the array stored at `attribute`, replacing whatever is there with
    /// an empty array if it is absent or not an array.
    pub fn array_mut(&mut self, attribute: &str) -> &mut Vec<Value> {
        let slot = self
            .attributes
            .entry(attribute.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !matches!(slot, Value::Array(_)) {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(arr) => arr,
            _ => unreachable!(),
        }
    }
}
