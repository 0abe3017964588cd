//! Top-level shape of a standards, study or software-defaults config file.

use serde::{Deserialize, Serialize};

use crate::host::{GlobalSettings, HostDictionary};
use crate::transformer::MetadataTransformers;

/// Authoring-time block of YAML anchors in the standards file; removed on load.
pub const REUSABLE_DEFINITIONS_KEY: &str = "_reusable_definitions";
pub const STUDY_SPECIFIC_METADATA_KEY: &str = "study_specific_metadata";
pub const METADATA_TRANSFORMERS_KEY: &str = "metadata_transformers";
pub const HOSTTYPE_COLUMN_OPTIONS_KEY: &str = "hosttype_column_options";
pub const SAMPLETYPE_COLUMN_OPTIONS_KEY: &str = "sampletype_column_options";

/// Flat host-type overlay applied at every depth of the standards tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudySpecificMetadata {
    #[serde(default)]
    pub host_type_specific_metadata: HostDictionary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataConfig {
    #[serde(flatten)]
    pub settings: GlobalSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosttype_column_options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampletype_column_options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "HostDictionary::is_empty")]
    pub host_type_specific_metadata: HostDictionary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_transformers: Option<MetadataTransformers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_specific_metadata: Option<StudySpecificMetadata>,
}

impl MetadataConfig {
    /// Key-by-key overlay: every top-level key present in `other` replaces
    /// the one here. Nested content is not merged.
    #[must_use]
    pub fn overlaid_by(&self, other: &MetadataConfig) -> MetadataConfig {
        let mut merged = self.clone();
        merged.settings.apply(&other.settings);
        if other.hosttype_column_options.is_some() {
            merged.hosttype_column_options = other.hosttype_column_options.clone();
        }
        if other.sampletype_column_options.is_some() {
            merged.sampletype_column_options = other.sampletype_column_options.clone();
        }
        if !other.host_type_specific_metadata.is_empty() {
            merged.host_type_specific_metadata = other.host_type_specific_metadata.clone();
        }
        if other.metadata_transformers.is_some() {
            merged.metadata_transformers = other.metadata_transformers.clone();
        }
        if other.study_specific_metadata.is_some() {
            merged.study_specific_metadata = other.study_specific_metadata.clone();
        }
        merged
    }

    /// The flat study overlay, empty when the file has none.
    pub fn study_hosts(&self) -> HostDictionary {
        self.study_specific_metadata
            .as_ref()
            .map(|study| study.host_type_specific_metadata.clone())
            .unwrap_or_default()
    }
}
