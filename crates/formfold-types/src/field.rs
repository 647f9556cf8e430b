// File: src/field.rs
// Purpose: Declarative field catalog - descriptors, field types, validation rule names

use serde::{Deserialize, Serialize};

/// The fixed catalog of field types a form can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    TextArea,
    TextList,
    DoubleTextList,
    Checkbox,
    Radio,
    Select,
    Date,
    Address,
    File,
    Photo,
    ProfilePhoto,
    FilePhoto,
    Article,
    Showcase,
    PillList,
}

impl FieldType {
    /// List-typed fields expose a variable number of repeated rows
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            FieldType::TextList | FieldType::DoubleTextList | FieldType::PillList
        )
    }

    /// Composite fields carry cross-field completeness rules
    pub fn is_composite(&self) -> bool {
        matches!(self, FieldType::Article | FieldType::Showcase)
    }
}

/// The fixed catalog of named validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    RequiredField,
    Email,
    PhoneNumber,
    UserName,
    CheckboxChecked,
    #[serde(rename = "text_length_below_30")]
    TextLengthBelow30,
    #[serde(rename = "text_length_below_50")]
    TextLengthBelow50,
    #[serde(rename = "text_length_below_100")]
    TextLengthBelow100,
    #[serde(rename = "text_length_below_200")]
    TextLengthBelow200,
    #[serde(rename = "text_length_below_300")]
    TextLengthBelow300,
    #[serde(rename = "text_length_below_400")]
    TextLengthBelow400,
    Number,
    Price,
}

impl Rule {
    /// Length ceiling for the text-length rules, None for the others
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Rule::TextLengthBelow30 => Some(30),
            Rule::TextLengthBelow50 => Some(50),
            Rule::TextLengthBelow100 => Some(100),
            Rule::TextLengthBelow200 => Some(200),
            Rule::TextLengthBelow300 => Some(300),
            Rule::TextLengthBelow400 => Some(400),
            _ => None,
        }
    }
}

/// Type-specific configuration carried by a descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraParam {
    /// Showcase: apply the Instagram-specific required set
    #[serde(default)]
    pub is_instagram_showcase: bool,

    /// Showcase: photo ceiling, 0 means unlimited
    #[serde(default)]
    pub max_photos: usize,
}

fn default_condition() -> bool {
    true
}

/// Declares one logical entity attribute of a form.
///
/// `attribute` values are unique within one form; descriptors are immutable
/// for the lifetime of one form render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Path root into the entity, unique per form
    pub attribute: String,

    /// Human-readable name used in validation messages
    pub display_name: String,

    /// Which control family renders and decodes this field
    pub kind: FieldType,

    /// Shorthand for a leading RequiredField rule
    #[serde(default)]
    pub required: bool,

    /// Ordered validation rules, evaluated first-failure-wins
    #[serde(default)]
    pub validations: Vec<Rule>,

    /// Type-specific configuration
    #[serde(default)]
    pub extra_param: ExtraParam,

    /// Gates whether the field participates at all
    #[serde(default = "default_condition")]
    pub condition: bool,
}

impl FieldDescriptor {
    pub fn new(attribute: &str, display_name: &str, kind: FieldType) -> Self {
        Self {
            attribute: attribute.to_string(),
            display_name: display_name.to_string(),
            kind,
            required: false,
            validations: Vec::new(),
            extra_param: ExtraParam::default(),
            condition: true,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validations(mut self, rules: Vec<Rule>) -> Self {
        self.validations = rules;
        self
    }

    pub fn extra_param(mut self, extra: ExtraParam) -> Self {
        self.extra_param = extra;
        self
    }

    pub fn condition(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }
}
