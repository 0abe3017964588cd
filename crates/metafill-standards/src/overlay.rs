//! Flat study overlay applied across the nested standards tree.

use std::collections::HashSet;

use metafill_model::{ConfigError, HostDictionary};
use tracing::debug;

use crate::combine::combine_host_nodes;

/// Applies `study_flat` to every level of `standards`.
///
/// A study host augments the standards host of the same name wherever it
/// occurs in the tree. Study hosts that match no standards host are dropped.
pub fn overlay_study(
    study_flat: &HostDictionary,
    standards: &HostDictionary,
) -> Result<HostDictionary, ConfigError> {
    let mut matched = HashSet::new();
    let overlaid = overlay_level(study_flat, standards, &mut matched)?;
    for name in study_flat.keys() {
        if !matched.contains(name.as_str()) {
            debug!(host_type = %name, "study host type matches no standards host; ignored");
        }
    }
    Ok(overlaid)
}

fn overlay_level<'a>(
    study_flat: &HostDictionary,
    level: &'a HostDictionary,
    matched: &mut HashSet<&'a str>,
) -> Result<HostDictionary, ConfigError> {
    let mut result = HostDictionary::with_capacity(level.len());
    for (name, node) in level {
        let mut augmented = match study_flat.get(name) {
            Some(study_node) => {
                matched.insert(name.as_str());
                combine_host_nodes(&node.without_children(), &study_node.without_children())?
            }
            None => node.without_children(),
        };
        if let Some(children) = node.children() {
            augmented.host_type_specific_metadata =
                Some(overlay_level(study_flat, children, matched)?);
        }
        result.insert(name.clone(), augmented);
    }
    Ok(result)
}
