//! YAML config loading.

use std::path::Path;

use metafill_model::MetadataConfig;
use metafill_model::config::REUSABLE_DEFINITIONS_KEY;
use serde_yaml::Value;
use tracing::debug;

use crate::error::StandardsError;

const SOFTWARE_DEFAULTS_NAME: &str = "defaults.yml";
const SOFTWARE_DEFAULTS_YAML: &str = include_str!("../config/defaults.yml");

/// Parses config text. Merge keys are applied and the
/// `_reusable_definitions` block is dropped before typing.
pub fn parse_config(contents: &str, source: &Path) -> Result<MetadataConfig, StandardsError> {
    let mut value: Value =
        serde_yaml::from_str(contents).map_err(|e| StandardsError::yaml(source, e))?;
    if value.is_null() {
        return Ok(MetadataConfig::default());
    }
    value
        .apply_merge()
        .map_err(|e| StandardsError::yaml(source, e))?;
    if let Value::Mapping(mapping) = &mut value {
        if mapping.remove(REUSABLE_DEFINITIONS_KEY).is_some() {
            debug!(path = %source.display(), "dropped reusable definitions block");
        }
    }
    serde_yaml::from_value(value).map_err(|e| StandardsError::yaml(source, e))
}

pub fn load_config(path: &Path) -> Result<MetadataConfig, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let config = parse_config(&contents, path)?;
    debug!(
        path = %path.display(),
        root_hosts = config.host_type_specific_metadata.len(),
        "loaded metadata config"
    );
    Ok(config)
}

/// Loads the nested standards tree.
pub fn load_standards(path: &Path) -> Result<MetadataConfig, StandardsError> {
    load_config(path)
}

/// The defaults bundled with the software.
pub fn load_software_defaults() -> Result<MetadataConfig, StandardsError> {
    parse_config(SOFTWARE_DEFAULTS_YAML, Path::new(SOFTWARE_DEFAULTS_NAME))
}
