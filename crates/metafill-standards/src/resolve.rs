//! Resolved-config facade.

use std::collections::BTreeSet;
use std::path::Path;

use metafill_model::columns::INTERNAL_COLUMNS;
use metafill_model::{ConfigError, MetadataConfig, ResolvedConfig};
use tracing::{debug, info};

use crate::error::StandardsError;
use crate::flatten::{exclude_internals, flatten, promote_globals, promote_settings};
use crate::loader::{load_software_defaults, load_standards};
use crate::overlay::overlay_study;
use crate::paths::default_standards_path;
use crate::transformers::merge_transformers;

/// Loads the standards and resolves them against a study config.
///
/// `software_defaults` falls back to the bundled defaults and
/// `standards_path` to [`default_standards_path`].
pub fn build_resolved_config(
    study: &MetadataConfig,
    software_defaults: Option<&MetadataConfig>,
    standards_path: Option<&Path>,
    exclude_internals: bool,
) -> Result<ResolvedConfig, StandardsError> {
    let bundled;
    let defaults = match software_defaults {
        Some(defaults) => defaults,
        None => {
            bundled = load_software_defaults()?;
            &bundled
        }
    };
    let path = standards_path.map_or_else(default_standards_path, Path::to_path_buf);
    let standards = load_standards(&path)?;
    let resolved = resolve_config(study, defaults, &standards, exclude_internals)?;
    info!(
        standards = %path.display(),
        host_types = resolved.host_type_specific_metadata.len(),
        "resolved metadata config"
    );
    Ok(resolved)
}

/// Resolves already-loaded configs. No input is modified.
pub fn resolve_config(
    study: &MetadataConfig,
    software_defaults: &MetadataConfig,
    standards: &MetadataConfig,
    exclude_internal_types: bool,
) -> Result<ResolvedConfig, ConfigError> {
    let merged = software_defaults.overlaid_by(study);

    // software defaults < standards globals < study globals
    let promoted = promote_settings(&promote_globals(standards)?, &study.settings)?;
    let overlaid = overlay_study(&merged.study_hosts(), &promoted.host_type_specific_metadata)?;
    let mut hosts = flatten(&overlaid)?;
    if exclude_internal_types {
        hosts = exclude_internals(&hosts);
    }
    debug!(host_types = hosts.len(), "flattened host types");

    let metadata_transformers = merge_transformers(
        standards.metadata_transformers.as_ref(),
        merged.metadata_transformers.as_ref(),
    );

    Ok(ResolvedConfig {
        settings: merged.settings.clone(),
        hosttype_column_options: merged
            .hosttype_column_options
            .clone()
            .or_else(|| standards.hosttype_column_options.clone())
            .unwrap_or_default(),
        sampletype_column_options: merged
            .sampletype_column_options
            .clone()
            .or_else(|| standards.sampletype_column_options.clone())
            .unwrap_or_default(),
        host_type_specific_metadata: hosts,
        metadata_transformers,
    })
}

/// Every column a populate run against `config` could produce, sorted.
pub fn reserved_columns(config: &ResolvedConfig) -> Vec<String> {
    let mut names: BTreeSet<String> = INTERNAL_COLUMNS.iter().map(|c| (*c).to_string()).collect();
    for host in config.host_type_specific_metadata.values() {
        names.extend(host.metadata_fields.keys().cloned());
        for sample in host.sample_type_specific_metadata.values() {
            names.extend(sample.metadata_fields.keys().cloned());
        }
    }
    names.into_iter().collect()
}
