//! Validation of populated tables.

use std::path::Path;

use metafill_model::{MetadataConfig, ResolvedConfig};
use metafill_standards::{load_software_defaults, parse_config, resolve_config};
use metafill_transform::{PopulateOptions, populate};
use metafill_validate::{ValidationMessage, validate_records};
use polars::prelude::*;

const STANDARDS: &str = r#"
host_type_specific_metadata:
  human:
    metadata_fields:
      dna_extracted:
        allowed: ["TRUE", "FALSE"]
        default: "TRUE"
        type: string
      host_age:
        anyof:
          - type: number
            min: 0
          - type: string
            allowed: [not collected, not provided]
        required: true
      host_taxid:
        default: 9606
        type: integer
    sample_type_specific_metadata:
      stool:
        metadata_fields:
          body_site:
            default: gut
            type: string
"#;

fn config(yaml: &str) -> MetadataConfig {
    parse_config(yaml, Path::new("inline.yml")).unwrap()
}

fn resolved(study: &str) -> ResolvedConfig {
    let defaults = load_software_defaults().unwrap();
    resolve_config(&config(study), &defaults, &config(STANDARDS), false).unwrap()
}

fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values
                    .into_iter()
                    .map(|v| v.map(String::from))
                    .collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

fn messages_for<'a>(messages: &'a [ValidationMessage], sample: &str) -> Vec<(&'a str, &'a str)> {
    messages
        .iter()
        .filter(|m| m.sample_name == sample)
        .map(|m| (m.field_name.as_str(), m.error_message.as_str()))
        .collect()
}

#[test]
fn populated_defaults_validate_cleanly() {
    let config = resolved("");
    let input = test_df(vec![
        ("sample_name", vec![Some("s1")]),
        ("hosttype_shorthand", vec![Some("human")]),
        ("sampletype_shorthand", vec![Some("stool")]),
        ("host_age", vec![Some("34")]),
    ]);
    let populated = populate(&config, &input, &PopulateOptions::default()).unwrap();
    let messages = validate_records(&config, &populated.data).unwrap();
    assert!(messages.is_empty(), "{messages:?}");
}

#[test]
fn bad_cells_are_reported_per_field() {
    let config = resolved("");
    let input = test_df(vec![
        ("sample_name", vec![Some("s1"), Some("s2")]),
        ("hosttype_shorthand", vec![Some("human"), Some("human")]),
        ("sampletype_shorthand", vec![Some("stool"), Some("stool")]),
        ("host_age", vec![Some("-3"), Some("ancient")]),
        ("dna_extracted", vec![Some("yes"), None]),
        ("host_taxid", vec![None, Some("human")]),
    ]);
    let populated = populate(&config, &input, &PopulateOptions::default()).unwrap();
    let messages = validate_records(&config, &populated.data).unwrap();

    let s1 = messages_for(&messages, "s1");
    assert!(s1.contains(&("dna_extracted", "unallowed value yes")));
    assert!(
        s1.iter()
            .any(|(field, error)| *field == "host_age"
                && error.starts_with("no definitions validate"))
    );

    let s2 = messages_for(&messages, "s2");
    assert!(s2.contains(&("host_taxid", "must be of integer type")));
    assert!(s2.iter().all(|(field, _)| *field != "dna_extracted"));
}

#[test]
fn failing_rows_are_not_validated() {
    let config = resolved("");
    let input = test_df(vec![
        ("sample_name", vec![Some("x1")]),
        ("hosttype_shorthand", vec![Some("martian")]),
        ("sampletype_shorthand", vec![Some("stool")]),
    ]);
    let populated = populate(&config, &input, &PopulateOptions::default()).unwrap();
    assert!(validate_records(&config, &populated.data).unwrap().is_empty());
}

#[test]
fn blank_required_cells_pass_unless_empty_is_forbidden() {
    let study = r#"
leave_requireds_blank: true
study_specific_metadata:
  host_type_specific_metadata:
    human:
      leave_requireds_blank: true
"#;
    let config = resolved(study);
    let input = test_df(vec![
        ("sample_name", vec![Some("s1")]),
        ("hosttype_shorthand", vec![Some("human")]),
        ("sampletype_shorthand", vec![Some("stool")]),
    ]);
    let populated = populate(&config, &input, &PopulateOptions::default()).unwrap();
    let messages = validate_records(&config, &populated.data).unwrap();
    assert!(messages_for(&messages, "s1").is_empty(), "{messages:?}");
}

#[test]
fn messages_serialize_flat() {
    let message = ValidationMessage {
        sample_name: "s1".to_string(),
        field_name: "host_age".to_string(),
        error_message: "required field".to_string(),
    };
    let json = serde_json::to_value(&message).unwrap();
    assert_eq!(json["field_name"], "host_age");
}
