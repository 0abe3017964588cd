//! Sample-type entries and their three mutually exclusive shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::ConfigError;
use crate::field::FieldDictionary;

pub const ALIAS_KEY: &str = "alias";
pub const BASE_TYPE_KEY: &str = "base_type";
pub const METADATA_FIELDS_KEY: &str = "metadata_fields";

/// Ordered mapping from sample-type name to its entry.
pub type SampleTypeDictionary = IndexMap<String, SampleTypeEntry>;

/// A sample-type entry as written in a config file.
///
/// Which keys are present decides the shape; see [`SampleTypeEntry::shape`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleTypeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_fields: Option<FieldDictionary>,
    /// Any other attributes carried alongside the shape keys.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Shape of a sample-type entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleTypeShape<'a> {
    /// Synonym for another sample type at the same host node.
    Alias(&'a str),
    /// Inherits everything from a base type and adds nothing.
    BaseOnly(&'a str),
    /// Carries its own field dictionary (possibly on top of a base type).
    Fields,
}

impl SampleTypeEntry {
    pub fn alias_of(target: impl Into<String>) -> Self {
        Self {
            alias: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn with_fields(fields: FieldDictionary) -> Self {
        Self {
            metadata_fields: Some(fields),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Classifies the entry, rejecting an alias combined with fields or a
    /// base type.
    pub fn shape(&self, name: &str) -> Result<SampleTypeShape<'_>, ConfigError> {
        if let Some(target) = self.alias.as_deref() {
            if self.metadata_fields.is_some() {
                return Err(ConfigError::InvalidSampleShape {
                    sample_type: name.to_string(),
                    message: format!(
                        "'{ALIAS_KEY}' cannot be combined with '{METADATA_FIELDS_KEY}'"
                    ),
                });
            }
            if self.base_type.is_some() {
                return Err(ConfigError::InvalidSampleShape {
                    sample_type: name.to_string(),
                    message: format!("'{ALIAS_KEY}' cannot be combined with '{BASE_TYPE_KEY}'"),
                });
            }
            return Ok(SampleTypeShape::Alias(target));
        }
        match (self.base_type.as_deref(), &self.metadata_fields) {
            (Some(base), None) => Ok(SampleTypeShape::BaseOnly(base)),
            _ => Ok(SampleTypeShape::Fields),
        }
    }

    /// The entry's own fields, empty when none are declared.
    pub fn fields(&self) -> FieldDictionary {
        self.metadata_fields.clone().unwrap_or_default()
    }
}
