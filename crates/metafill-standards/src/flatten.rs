//! Flattening of the nested host tree into self-contained host nodes.
//!
//! The walk is top-down for inheritance and bottom-up for resolution: each
//! host first absorbs its ancestors' content, its children are processed,
//! and only then are its own aliases and base types resolved.

use indexmap::IndexMap;
use metafill_model::columns::{QIITA_SAMPLE_TYPE, SAMPLE_TYPE};
use metafill_model::{
    ConfigError, FieldDefinition, FieldDictionary, GlobalSettings, HostDictionary, HostNode,
    MetadataConfig, ResolvedHost, ResolvedSampleType, SampleTypeDictionary, SampleTypeEntry,
    SampleTypeShape,
};
use tracing::{debug, warn};

use crate::combine::combine_host_nodes;
use crate::merge::merge_fields;

/// Host name -> resolved host, in post-order of the nested tree.
pub type FlatHostMap = IndexMap<String, ResolvedHost>;

/// Copies top-level global settings onto the single root host.
pub fn promote_globals(config: &MetadataConfig) -> Result<MetadataConfig, ConfigError> {
    promote_settings(config, &config.settings)
}

/// Applies `settings` over the single root host's own settings.
pub fn promote_settings(
    config: &MetadataConfig,
    settings: &GlobalSettings,
) -> Result<MetadataConfig, ConfigError> {
    let roots = &config.host_type_specific_metadata;
    if roots.len() != 1 {
        return Err(ConfigError::MultiRoot {
            count: roots.len(),
            hosts: roots.keys().cloned().collect(),
        });
    }
    let mut promoted = config.clone();
    if !settings.is_empty() {
        for (name, root) in &mut promoted.host_type_specific_metadata {
            debug!(host_type = %name, "promoting global settings onto root host");
            root.settings.apply(settings);
        }
    }
    Ok(promoted)
}

/// Flattens a nested host dictionary.
pub fn flatten(hosts: &HostDictionary) -> Result<FlatHostMap, ConfigError> {
    let mut flat = FlatHostMap::new();
    walk(&HostNode::default(), hosts, &mut flat)?;
    Ok(flat)
}

fn walk(
    parent: &HostNode,
    level: &HostDictionary,
    flat: &mut FlatHostMap,
) -> Result<(), ConfigError> {
    for (name, node) in level {
        let inherited = combine_host_nodes(parent, &node.without_children())?;
        if let Some(children) = node.children() {
            walk(&inherited, children, flat)?;
        }
        let resolved = resolve_host(name, &inherited)?;
        if flat.insert(name.clone(), resolved).is_some() {
            warn!(
                host_type = %name,
                "host type defined more than once; keeping the later definition"
            );
        }
    }
    Ok(())
}

/// Resolves every sample type of an inherited host node.
pub fn resolve_host(host_type: &str, inherited: &HostNode) -> Result<ResolvedHost, ConfigError> {
    let host_fields = inherited.metadata_fields.clone().unwrap_or_default();
    let empty = SampleTypeDictionary::new();
    let samples = inherited
        .sample_type_specific_metadata
        .as_ref()
        .unwrap_or(&empty);

    let mut resolved_samples = IndexMap::with_capacity(samples.len());
    for (name, entry) in samples {
        let resolved = resolve_sample_type(host_type, &host_fields, samples, name, entry)?;
        resolved_samples.insert(name.clone(), resolved);
    }

    Ok(ResolvedHost {
        settings: inherited.settings.clone(),
        metadata_fields: host_fields,
        sample_type_specific_metadata: resolved_samples,
    })
}

fn resolve_sample_type(
    host_type: &str,
    host_fields: &FieldDictionary,
    samples: &SampleTypeDictionary,
    name: &str,
    entry: &SampleTypeEntry,
) -> Result<ResolvedSampleType, ConfigError> {
    let (target_name, target) = alias_target(host_type, samples, name, entry)?;

    let own_fields = match target.base_type.as_deref() {
        Some(base_name) => {
            let base = base_entry(host_type, samples, target_name, base_name)?;
            merge_fields(&base.fields(), &target.fields())
        }
        None => target.fields(),
    };

    let mut fields = merge_fields(host_fields, &own_fields);
    fields.insert(SAMPLE_TYPE.to_string(), FieldDefinition::identity(target_name));
    if !fields.contains_key(QIITA_SAMPLE_TYPE) {
        fields.insert(
            QIITA_SAMPLE_TYPE.to_string(),
            FieldDefinition::identity(target_name),
        );
    }
    Ok(ResolvedSampleType {
        metadata_fields: fields,
    })
}

fn alias_target<'a>(
    host_type: &str,
    samples: &'a SampleTypeDictionary,
    name: &'a str,
    entry: &'a SampleTypeEntry,
) -> Result<(&'a str, &'a SampleTypeEntry), ConfigError> {
    match entry.shape(name)? {
        SampleTypeShape::Alias(target) => {
            let Some((target_name, target_entry)) = samples.get_key_value(target) else {
                return Err(ConfigError::UnknownAliasTarget {
                    host_type: host_type.to_string(),
                    sample_type: name.to_string(),
                    target: target.to_string(),
                });
            };
            if target_entry.alias.is_some() {
                return Err(ConfigError::ChainedAlias {
                    host_type: host_type.to_string(),
                    sample_type: name.to_string(),
                    target: target.to_string(),
                });
            }
            target_entry.shape(target_name)?;
            Ok((target_name.as_str(), target_entry))
        }
        SampleTypeShape::BaseOnly(_) | SampleTypeShape::Fields => Ok((name, entry)),
    }
}

fn base_entry<'a>(
    host_type: &str,
    samples: &'a SampleTypeDictionary,
    sample_type: &str,
    base_name: &str,
) -> Result<&'a SampleTypeEntry, ConfigError> {
    if base_name == sample_type {
        return Err(ConfigError::SelfBase {
            host_type: host_type.to_string(),
            sample_type: sample_type.to_string(),
        });
    }
    let Some(base) = samples.get(base_name) else {
        return Err(ConfigError::UnknownBaseType {
            host_type: host_type.to_string(),
            sample_type: sample_type.to_string(),
            base_type: base_name.to_string(),
        });
    };
    if base.alias.is_some() {
        return Err(ConfigError::BaseTypeIsAlias {
            host_type: host_type.to_string(),
            sample_type: sample_type.to_string(),
            base_type: base_name.to_string(),
        });
    }
    if base.base_type.is_some() {
        return Err(ConfigError::ChainedBase {
            host_type: host_type.to_string(),
            sample_type: sample_type.to_string(),
            base_type: base_name.to_string(),
        });
    }
    Ok(base)
}

/// Whether a host or sample-type name is internal (leading underscore).
pub fn is_internal_name(name: &str) -> bool {
    name.starts_with('_')
}

/// Drops internal hosts, and internal sample types of the remaining hosts.
pub fn exclude_internals(flat: &FlatHostMap) -> FlatHostMap {
    flat.iter()
        .filter(|(name, _)| !is_internal_name(name))
        .map(|(name, host)| {
            let mut host = host.clone();
            host.sample_type_specific_metadata
                .retain(|sample, _| !is_internal_name(sample));
            (name.clone(), host)
        })
        .collect()
}
