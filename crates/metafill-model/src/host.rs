//! Host-type nodes in their nested (config file) form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::field::FieldDictionary;
use crate::sample_type::SampleTypeDictionary;

pub const LEAVE_REQUIREDS_BLANK_KEY: &str = "leave_requireds_blank";
pub const OVERWRITE_NON_NANS_KEY: &str = "overwrite_non_nans";
pub const SAMPLE_TYPE_SPECIFIC_METADATA_KEY: &str = "sample_type_specific_metadata";
pub const HOST_TYPE_SPECIFIC_METADATA_KEY: &str = "host_type_specific_metadata";

/// Ordered mapping from host-type name to its node.
pub type HostDictionary = IndexMap<String, HostNode>;

/// The closed set of settings that cascade from a node to its descendants:
/// `default`, `leave_requireds_blank` and `overwrite_non_nans`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_requireds_blank: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite_non_nans: Option<bool>,
}

impl GlobalSettings {
    pub fn is_empty(&self) -> bool {
        self.default.is_none()
            && self.leave_requireds_blank.is_none()
            && self.overwrite_non_nans.is_none()
    }

    /// Overwrites every setting that `other` carries.
    pub fn apply(&mut self, other: &GlobalSettings) {
        if let Some(default) = &other.default {
            self.default = Some(default.clone());
        }
        if let Some(leave) = other.leave_requireds_blank {
            self.leave_requireds_blank = Some(leave);
        }
        if let Some(overwrite) = other.overwrite_non_nans {
            self.overwrite_non_nans = Some(overwrite);
        }
    }
}

/// A host type as written in a standards or study file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostNode {
    #[serde(flatten)]
    pub settings: GlobalSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_fields: Option<FieldDictionary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_type_specific_metadata: Option<SampleTypeDictionary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_type_specific_metadata: Option<HostDictionary>,
}

impl HostNode {
    pub fn with_fields(fields: FieldDictionary) -> Self {
        Self {
            metadata_fields: Some(fields),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sample_types(mut self, sample_types: SampleTypeDictionary) -> Self {
        self.sample_type_specific_metadata = Some(sample_types);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: HostDictionary) -> Self {
        self.host_type_specific_metadata = Some(children);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: GlobalSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn children(&self) -> Option<&HostDictionary> {
        self.host_type_specific_metadata.as_ref()
    }

    /// Copy of this node without its child host types.
    pub fn without_children(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            metadata_fields: self.metadata_fields.clone(),
            sample_type_specific_metadata: self.sample_type_specific_metadata.clone(),
            host_type_specific_metadata: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_only_present_settings() {
        let mut base = GlobalSettings {
            default: Some(Value::from("not provided")),
            leave_requireds_blank: Some(true),
            overwrite_non_nans: None,
        };
        base.apply(&GlobalSettings {
            default: None,
            leave_requireds_blank: Some(false),
            overwrite_non_nans: Some(true),
        });
        assert_eq!(base.default, Some(Value::from("not provided")));
        assert_eq!(base.leave_requireds_blank, Some(false));
        assert_eq!(base.overwrite_non_nans, Some(true));
    }

    #[test]
    fn parses_nested_host_node() {
        let yaml = r#"
default: not applicable
metadata_fields:
  env_package:
    default: host-associated
    type: string
sample_type_specific_metadata:
  stool:
    metadata_fields:
      body_site:
        default: gut
host_type_specific_metadata:
  human:
    leave_requireds_blank: true
"#;
        let node: HostNode = serde_yaml::from_str(yaml).expect("parse host node");
        assert_eq!(node.settings.default, Some(Value::from("not applicable")));
        assert!(node.metadata_fields.as_ref().is_some_and(|f| f.contains_key("env_package")));
        let children = node.children().expect("children");
        assert_eq!(
            children["human"].settings.leave_requireds_blank,
            Some(true)
        );
        assert!(node.without_children().children().is_none());
    }
}
