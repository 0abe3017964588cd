//! Fully resolved configuration: one self-contained node per host type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::field::FieldDictionary;
use crate::host::GlobalSettings;
use crate::transformer::MetadataTransformers;

/// A sample type after alias and base-type resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSampleType {
    pub metadata_fields: FieldDictionary,
}

/// A host type with all inherited content folded in and no children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedHost {
    #[serde(flatten)]
    pub settings: GlobalSettings,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata_fields: FieldDictionary,
    #[serde(default)]
    pub sample_type_specific_metadata: IndexMap<String, ResolvedSampleType>,
}

impl ResolvedHost {
    pub fn sample_type(&self, name: &str) -> Option<&ResolvedSampleType> {
        self.sample_type_specific_metadata.get(name)
    }
}

/// Output of the configuration resolution engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    #[serde(flatten)]
    pub settings: GlobalSettings,
    #[serde(default)]
    pub hosttype_column_options: Vec<String>,
    #[serde(default)]
    pub sampletype_column_options: Vec<String>,
    #[serde(default)]
    pub host_type_specific_metadata: IndexMap<String, ResolvedHost>,
    #[serde(default, skip_serializing_if = "MetadataTransformers::is_empty")]
    pub metadata_transformers: MetadataTransformers,
}

impl ResolvedConfig {
    pub fn host(&self, name: &str) -> Option<&ResolvedHost> {
        self.host_type_specific_metadata.get(name)
    }

    /// Config-level `overwrite_non_nans`, `false` when unset.
    pub fn overwrite_non_nans(&self) -> bool {
        self.settings.overwrite_non_nans.unwrap_or(false)
    }

    /// Host value, falling back to the config-level value.
    pub fn effective_overwrite_non_nans(&self, host: &ResolvedHost) -> bool {
        host.settings
            .overwrite_non_nans
            .unwrap_or_else(|| self.overwrite_non_nans())
    }

    /// Host value, falling back to the config-level value, `false` when
    /// neither is set.
    pub fn effective_leave_requireds_blank(&self, host: &ResolvedHost) -> bool {
        host.settings
            .leave_requireds_blank
            .or(self.settings.leave_requireds_blank)
            .unwrap_or(false)
    }

    /// Host `default`, falling back to the config-level `default`.
    pub fn effective_default<'a>(&'a self, host: &'a ResolvedHost) -> Option<&'a Value> {
        host.settings
            .default
            .as_ref()
            .or(self.settings.default.as_ref())
    }
}
