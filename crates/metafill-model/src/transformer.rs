//! Transformer definitions grouped by phase.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const PRE_TRANSFORMERS_KEY: &str = "pre_transformers";
pub const POST_TRANSFORMERS_KEY: &str = "post_transformers";

/// Target field name -> transformer producing it.
pub type TransformerMap = IndexMap<String, TransformerDefinition>;

/// A named function applied to source columns to fill one target column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerDefinition {
    #[serde(default)]
    pub sources: Vec<String>,
    pub function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite_non_nans: Option<bool>,
}

impl TransformerDefinition {
    pub fn new(function: impl Into<String>, sources: &[&str]) -> Self {
        Self {
            sources: sources.iter().map(|s| (*s).to_string()).collect(),
            function: function.into(),
            overwrite_non_nans: None,
        }
    }

    #[must_use]
    pub fn with_overwrite_non_nans(mut self, overwrite: bool) -> Self {
        self.overwrite_non_nans = Some(overwrite);
        self
    }
}

/// When a transformer runs relative to default filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformerPhase {
    Pre,
    Post,
}

impl TransformerPhase {
    pub const ALL: [TransformerPhase; 2] = [TransformerPhase::Pre, TransformerPhase::Post];

    pub fn key(self) -> &'static str {
        match self {
            Self::Pre => PRE_TRANSFORMERS_KEY,
            Self::Post => POST_TRANSFORMERS_KEY,
        }
    }
}

/// The `metadata_transformers` block of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTransformers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_transformers: Option<TransformerMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_transformers: Option<TransformerMap>,
}

impl MetadataTransformers {
    pub fn phase(&self, phase: TransformerPhase) -> Option<&TransformerMap> {
        match phase {
            TransformerPhase::Pre => self.pre_transformers.as_ref(),
            TransformerPhase::Post => self.post_transformers.as_ref(),
        }
    }

    pub fn phase_mut(&mut self, phase: TransformerPhase) -> &mut Option<TransformerMap> {
        match phase {
            TransformerPhase::Pre => &mut self.pre_transformers,
            TransformerPhase::Post => &mut self.post_transformers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pre_transformers.is_none() && self.post_transformers.is_none()
    }
}
