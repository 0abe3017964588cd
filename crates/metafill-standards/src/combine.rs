//! Host-node combiner.

use metafill_model::{
    ConfigError, FieldDictionary, HostNode, SampleTypeDictionary, SampleTypeEntry,
    SampleTypeShape,
};

use crate::merge::merge_fields;

/// Combines two host nodes, `add` over `base`.
///
/// Global settings present in `add` overwrite those in `base`; field and
/// sample-type dictionaries are merged and omitted when empty. `base`'s
/// child host types are carried over unchanged.
pub fn combine_host_nodes(base: &HostNode, add: &HostNode) -> Result<HostNode, ConfigError> {
    let mut combined = base.clone();
    combined.settings.apply(&add.settings);

    let empty_fields = FieldDictionary::new();
    let fields = merge_fields(
        base.metadata_fields.as_ref().unwrap_or(&empty_fields),
        add.metadata_fields.as_ref().unwrap_or(&empty_fields),
    );
    combined.metadata_fields = (!fields.is_empty()).then_some(fields);

    let empty_samples = SampleTypeDictionary::new();
    let sample_types = merge_sample_types(
        base.sample_type_specific_metadata
            .as_ref()
            .unwrap_or(&empty_samples),
        add.sample_type_specific_metadata
            .as_ref()
            .unwrap_or(&empty_samples),
    )?;
    combined.sample_type_specific_metadata = (!sample_types.is_empty()).then_some(sample_types);

    Ok(combined)
}

/// Merges sample-type dictionaries, `add` over `base`.
///
/// Two fields-shaped entries merge; any other pairing is replaced wholesale
/// by the `add` entry.
pub fn merge_sample_types(
    base: &SampleTypeDictionary,
    add: &SampleTypeDictionary,
) -> Result<SampleTypeDictionary, ConfigError> {
    let mut merged = base.clone();
    for (name, add_entry) in add {
        let add_shape = add_entry.shape(name)?;
        let entry = match merged.get(name) {
            Some(base_entry)
                if add_shape == SampleTypeShape::Fields
                    && matches!(base_entry.shape(name), Ok(SampleTypeShape::Fields)) =>
            {
                merge_fields_shaped(base_entry, add_entry)
            }
            _ => add_entry.clone(),
        };
        merged.insert(name.clone(), entry);
    }
    Ok(merged)
}

fn merge_fields_shaped(base: &SampleTypeEntry, add: &SampleTypeEntry) -> SampleTypeEntry {
    let mut merged = base.clone();
    if add.base_type.is_some() {
        merged.base_type = add.base_type.clone();
    }
    for (key, value) in &add.extra {
        merged.extra.insert(key.clone(), value.clone());
    }
    merged.metadata_fields = match (&base.metadata_fields, &add.metadata_fields) {
        (None, None) => None,
        (base_fields, add_fields) => Some(merge_fields(
            base_fields.as_ref().unwrap_or(&FieldDictionary::new()),
            add_fields.as_ref().unwrap_or(&FieldDictionary::new()),
        )),
    };
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use metafill_model::field::DEFAULT_KEY;
    use metafill_model::{FieldDefinition, GlobalSettings};
    use serde_yaml::Value;

    fn fields(entries: &[(&str, &str)]) -> FieldDictionary {
        entries
            .iter()
            .map(|(name, default)| {
                (
                    (*name).to_string(),
                    FieldDefinition::new().with(DEFAULT_KEY, *default),
                )
            })
            .collect()
    }

    fn samples(entries: Vec<(&str, SampleTypeEntry)>) -> SampleTypeDictionary {
        entries
            .into_iter()
            .map(|(name, entry)| (name.to_string(), entry))
            .collect()
    }

    #[test]
    fn add_settings_overwrite_base() {
        let base = HostNode::default().with_settings(GlobalSettings {
            default: Some(Value::from("not provided")),
            leave_requireds_blank: Some(false),
            overwrite_non_nans: None,
        });
        let add = HostNode::default().with_settings(GlobalSettings {
            default: None,
            leave_requireds_blank: Some(true),
            overwrite_non_nans: None,
        });
        let combined = combine_host_nodes(&base, &add).expect("combine");
        assert_eq!(
            combined.settings.default,
            Some(Value::from("not provided"))
        );
        assert_eq!(combined.settings.leave_requireds_blank, Some(true));
    }

    #[test]
    fn empty_dictionaries_are_omitted() {
        let combined =
            combine_host_nodes(&HostNode::default(), &HostNode::default()).expect("combine");
        assert!(combined.metadata_fields.is_none());
        assert!(combined.sample_type_specific_metadata.is_none());
    }

    #[test]
    fn fields_shaped_entries_merge() {
        let base = HostNode::default().with_sample_types(samples(vec![(
            "stool",
            SampleTypeEntry::with_fields(fields(&[("body_site", "gut"), ("env_biome", "a")])),
        )]));
        let add = HostNode::default().with_sample_types(samples(vec![(
            "stool",
            SampleTypeEntry::with_fields(fields(&[("env_biome", "b")])),
        )]));
        let combined = combine_host_nodes(&base, &add).expect("combine");
        let stool = &combined.sample_type_specific_metadata.expect("samples")["stool"];
        let stool_fields = stool.metadata_fields.as_ref().expect("fields");
        assert_eq!(
            stool_fields["body_site"].default_value(),
            Some(&Value::from("gut"))
        );
        assert_eq!(
            stool_fields["env_biome"].default_value(),
            Some(&Value::from("b"))
        );
    }

    #[test]
    fn differing_shapes_replace_wholesale() {
        let base = HostNode::default().with_sample_types(samples(vec![(
            "feces",
            SampleTypeEntry::with_fields(fields(&[("body_site", "gut")])),
        )]));
        let add = HostNode::default()
            .with_sample_types(samples(vec![("feces", SampleTypeEntry::alias_of("stool"))]));
        let combined = combine_host_nodes(&base, &add).expect("combine");
        let feces = &combined.sample_type_specific_metadata.expect("samples")["feces"];
        assert_eq!(feces, &SampleTypeEntry::alias_of("stool"));
    }

    #[test]
    fn invalid_add_shape_fails() {
        let mut bad = SampleTypeEntry::alias_of("stool");
        bad.metadata_fields = Some(FieldDictionary::new());
        let add = HostNode::default().with_sample_types(samples(vec![("feces", bad)]));
        let err = combine_host_nodes(&HostNode::default(), &add).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSampleShape { .. }));
    }
}
