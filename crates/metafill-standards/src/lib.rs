#![deny(unsafe_code)]

pub mod combine;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod merge;
pub mod overlay;
pub mod paths;
pub mod resolve;
pub mod transformers;

pub use crate::combine::{combine_host_nodes, merge_sample_types};
pub use crate::error::StandardsError;
pub use crate::flatten::{
    FlatHostMap, exclude_internals, flatten, promote_globals, promote_settings,
};
pub use crate::loader::{load_config, load_software_defaults, load_standards, parse_config};
pub use crate::merge::{merge_definition, merge_fields};
pub use crate::overlay::overlay_study;
pub use crate::paths::{STANDARDS_ENV_VAR, default_standards_path};
pub use crate::resolve::{build_resolved_config, reserved_columns, resolve_config};
pub use crate::transformers::merge_transformers;
