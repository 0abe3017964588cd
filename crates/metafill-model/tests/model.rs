//! Tests for metafill-model types.

use metafill_model::{
    GlobalSettings, MetadataConfig, ResolvedConfig, ResolvedHost, TransformerPhase,
};
use serde_yaml::Value;

const STUDY_YAML: &str = r#"
default: not provided
overwrite_non_nans: false
hosttype_column_options:
  - host_type
metadata_transformers:
  pre_transformers:
    sex:
      sources: [raw_sex]
      function: transform_input_sex_to_std_sex
study_specific_metadata:
  host_type_specific_metadata:
    human:
      metadata_fields:
        host_common_name:
          default: subject
"#;

#[test]
fn parses_study_config() {
    let config: MetadataConfig = serde_yaml::from_str(STUDY_YAML).expect("parse study");
    assert_eq!(config.settings.default, Some(Value::from("not provided")));
    assert_eq!(config.settings.overwrite_non_nans, Some(false));
    assert_eq!(
        config.hosttype_column_options.as_deref(),
        Some(&["host_type".to_string()][..])
    );
    let transformers = config.metadata_transformers.as_ref().expect("transformers");
    let pre = transformers
        .phase(TransformerPhase::Pre)
        .expect("pre transformers");
    assert_eq!(pre["sex"].function, "transform_input_sex_to_std_sex");
    assert_eq!(pre["sex"].sources, vec!["raw_sex"]);
    assert!(transformers.phase(TransformerPhase::Post).is_none());

    let study_hosts = config.study_hosts();
    assert!(study_hosts.contains_key("human"));
}

#[test]
fn overlay_replaces_present_top_level_keys_only() {
    let defaults: MetadataConfig = serde_yaml::from_str(
        "default: not provided\nleave_requireds_blank: false\nsampletype_column_options: [sampletype]\n",
    )
    .expect("parse defaults");
    let study: MetadataConfig = serde_yaml::from_str(STUDY_YAML).expect("parse study");

    let merged = defaults.overlaid_by(&study);
    assert_eq!(merged.settings.leave_requireds_blank, Some(false));
    assert_eq!(merged.settings.overwrite_non_nans, Some(false));
    assert_eq!(
        merged.sampletype_column_options.as_deref(),
        Some(&["sampletype".to_string()][..])
    );
    assert!(merged.metadata_transformers.is_some());

    // neither input changes
    assert!(defaults.metadata_transformers.is_none());
    assert!(study.sampletype_column_options.is_none());
}

#[test]
fn effective_settings_fall_back_to_config_level() {
    let config = ResolvedConfig {
        settings: GlobalSettings {
            default: Some(Value::from("not provided")),
            leave_requireds_blank: Some(true),
            overwrite_non_nans: Some(true),
        },
        ..ResolvedConfig::default()
    };
    let bare = ResolvedHost::default();
    assert!(config.effective_overwrite_non_nans(&bare));
    assert!(config.effective_leave_requireds_blank(&bare));
    assert_eq!(
        config.effective_default(&bare),
        Some(&Value::from("not provided"))
    );

    let host = ResolvedHost {
        settings: GlobalSettings {
            default: Some(Value::from("not applicable")),
            leave_requireds_blank: Some(false),
            overwrite_non_nans: Some(false),
        },
        ..ResolvedHost::default()
    };
    assert!(!config.effective_overwrite_non_nans(&host));
    assert_eq!(
        config.effective_default(&host),
        Some(&Value::from("not applicable"))
    );
    assert!(!config.effective_leave_requireds_blank(&host));
    let unset = ResolvedConfig::default();
    assert!(!unset.effective_leave_requireds_blank(&ResolvedHost::default()));
}

#[test]
fn resolved_config_serializes_to_json() {
    let config = ResolvedConfig::default();
    let json = serde_json::to_value(&config).expect("serialize");
    assert!(json.get("host_type_specific_metadata").is_some());
    assert!(json.get("metadata_transformers").is_none());
}
