//! Transformer-block merge.

use metafill_model::{MetadataTransformers, TransformerPhase};

/// Merges the standards and study transformer blocks per phase.
///
/// Study entries win on a shared target field; standards entries survive
/// otherwise. A phase absent from both sides stays absent.
pub fn merge_transformers(
    standards: Option<&MetadataTransformers>,
    study: Option<&MetadataTransformers>,
) -> MetadataTransformers {
    let mut merged = MetadataTransformers::default();
    for phase in TransformerPhase::ALL {
        let stds_phase = standards.and_then(|t| t.phase(phase));
        let study_phase = study.and_then(|t| t.phase(phase));
        let combined = match (stds_phase, study_phase) {
            (None, None) => None,
            (stds, study) => {
                let mut map = stds.cloned().unwrap_or_default();
                if let Some(study) = study {
                    for (target, definition) in study {
                        map.insert(target.clone(), definition.clone());
                    }
                }
                Some(map)
            }
        };
        *merged.phase_mut(phase) = combined;
    }
    merged
}
