//! Metadata configuration model.
//!
//! Types shared by the resolution engine, the row populator and the
//! validator: field definitions, sample-type entries, host nodes in nested
//! and resolved form, transformer definitions, and the config-shape errors.

pub mod columns;
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod resolved;
pub mod sample_type;
pub mod transformer;
pub mod value;

pub use config::{MetadataConfig, StudySpecificMetadata};
pub use error::{ConfigError, Result};
pub use field::{FieldDefinition, FieldDictionary, FieldType};
pub use host::{GlobalSettings, HostDictionary, HostNode};
pub use resolved::{ResolvedConfig, ResolvedHost, ResolvedSampleType};
pub use sample_type::{SampleTypeDictionary, SampleTypeEntry, SampleTypeShape};
pub use transformer::{
    MetadataTransformers, TransformerDefinition, TransformerMap, TransformerPhase,
};
pub use value::render_value;
