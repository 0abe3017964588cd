//! Property tests for the merge primitives and the internal filter.

use indexmap::IndexMap;
use metafill_model::field::{ALLOWED_KEY, ANYOF_KEY, DEFAULT_KEY, TYPE_KEY};
use metafill_model::{
    FieldDefinition, FieldDictionary, ResolvedHost, ResolvedSampleType,
};
use metafill_standards::{FlatHostMap, exclude_internals, merge_fields};
use proptest::prelude::*;
use serde_yaml::Value;

fn definition() -> impl Strategy<Value = FieldDefinition> {
    (
        prop::option::of(prop::sample::select(vec!["string", "number", "integer", "boolean"])),
        prop::option::of("[a-z]{1,6}"),
        0u8..3,
    )
        .prop_map(|(field_type, default, restriction)| {
            let mut def = FieldDefinition::new();
            if let Some(default) = default {
                def.insert(DEFAULT_KEY, Value::from(default));
            }
            match restriction {
                1 => {
                    if let Some(field_type) = field_type {
                        def.insert(TYPE_KEY, Value::from(field_type));
                    }
                    def.insert(ALLOWED_KEY, Value::Sequence(vec![Value::from("a")]));
                }
                2 => {
                    def.insert(
                        ANYOF_KEY,
                        Value::Sequence(vec![Value::Mapping(Default::default())]),
                    );
                }
                _ => {
                    if let Some(field_type) = field_type {
                        def.insert(TYPE_KEY, Value::from(field_type));
                    }
                }
            }
            def
        })
}

fn dictionary() -> impl Strategy<Value = FieldDictionary> {
    prop::collection::vec(("[a-d]", definition()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

fn flat_map() -> impl Strategy<Value = FlatHostMap> {
    let host = prop::collection::vec("_?[a-c]", 0..4).prop_map(|samples| ResolvedHost {
        sample_type_specific_metadata: samples
            .into_iter()
            .map(|name| (name, ResolvedSampleType::default()))
            .collect::<IndexMap<_, _>>(),
        ..ResolvedHost::default()
    });
    prop::collection::vec(("_?[a-c]", host), 0..4).prop_map(|hosts| hosts.into_iter().collect())
}

proptest! {
    #[test]
    fn merge_fields_is_pure_and_keeps_every_field(base in dictionary(), add in dictionary()) {
        let (base_before, add_before) = (base.clone(), add.clone());
        let merged = merge_fields(&base, &add);

        prop_assert_eq!(&base, &base_before);
        prop_assert_eq!(&add, &add_before);
        for name in base.keys().chain(add.keys()) {
            prop_assert!(merged.contains_key(name));
        }
        let added = add.keys().filter(|k| !base.contains_key(*k)).count();
        prop_assert_eq!(merged.len(), base.len() + added);
    }

    #[test]
    fn merge_fields_enforces_exclusivity(base in dictionary(), add in dictionary()) {
        let merged = merge_fields(&base, &add);
        for (name, add_def) in &add {
            let result = &merged[name];
            if add_def.contains(ALLOWED_KEY) {
                prop_assert!(!result.contains(ANYOF_KEY));
            }
            if add_def.contains(ANYOF_KEY) {
                prop_assert!(!result.contains(ALLOWED_KEY));
                prop_assert!(!result.contains(TYPE_KEY));
            }
        }
    }

    #[test]
    fn exclude_internals_is_idempotent(flat in flat_map()) {
        let once = exclude_internals(&flat);
        let twice = exclude_internals(&once);
        prop_assert_eq!(&once, &twice);
        for (name, host) in &once {
            prop_assert!(!name.starts_with('_'));
            prop_assert!(host.sample_type_specific_metadata.keys().all(|s| !s.starts_with('_')));
        }
    }
}
