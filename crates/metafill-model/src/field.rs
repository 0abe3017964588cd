//! Field definitions and field dictionaries.
//!
//! A field definition is an ordered set of attributes (`type`, `default`,
//! `required`, `allowed`, `anyof`, ...). Attributes are kept as raw YAML
//! values so that validator-only markers survive resolution untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

pub const TYPE_KEY: &str = "type";
pub const DEFAULT_KEY: &str = "default";
pub const REQUIRED_KEY: &str = "required";
pub const ALLOWED_KEY: &str = "allowed";
pub const ANYOF_KEY: &str = "anyof";
pub const EMPTY_KEY: &str = "empty";
pub const IS_PHI_KEY: &str = "is_phi";
pub const UNIQUE_KEY: &str = "unique";
pub const MIN_KEY: &str = "min";

/// Ordered mapping from field name to its definition.
pub type FieldDictionary = IndexMap<String, FieldDefinition>;

/// Declared value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
}

impl FieldType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// Attributes of a single metadata field, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldDefinition {
    attributes: IndexMap<String, Value>,
}

impl FieldDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Definition used for the `sample_type` and `qiita_sample_type` fields of
    /// a resolved sample type.
    pub fn identity(sample_type: &str) -> Self {
        Self::new()
            .with(
                ALLOWED_KEY,
                Value::Sequence(vec![Value::String(sample_type.to_string())]),
            )
            .with(DEFAULT_KEY, sample_type)
            .with(TYPE_KEY, FieldType::String.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Sets an attribute, keeping its position when it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.attributes.insert(key.into(), value)
    }

    /// Removes an attribute, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.get(DEFAULT_KEY)
    }

    pub fn is_required(&self) -> bool {
        matches!(self.get(REQUIRED_KEY), Some(Value::Bool(true)))
    }

    pub fn field_type(&self) -> Option<FieldType> {
        self.get(TYPE_KEY)
            .and_then(Value::as_str)
            .and_then(FieldType::parse)
    }

    pub fn allowed(&self) -> Option<&[Value]> {
        match self.get(ALLOWED_KEY) {
            Some(Value::Sequence(values)) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Sub-definitions of an `anyof` attribute. Entries that are not
    /// mappings are skipped.
    pub fn any_of(&self) -> Option<Vec<FieldDefinition>> {
        let Some(Value::Sequence(options)) = self.get(ANYOF_KEY) else {
            return None;
        };
        Some(
            options
                .iter()
                .filter_map(|option| serde_yaml::from_value(option.clone()).ok())
                .collect(),
        )
    }

    /// `Some(false)` when the field declares `empty: false`.
    pub fn allows_empty(&self) -> Option<bool> {
        self.get(EMPTY_KEY).and_then(Value::as_bool)
    }

    pub fn min(&self) -> Option<f64> {
        self.get(MIN_KEY).and_then(Value::as_f64)
    }
}

impl FromIterator<(String, Value)> for FieldDefinition {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}
