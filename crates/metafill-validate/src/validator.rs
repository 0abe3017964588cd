use metafill_model::ResolvedConfig;
use metafill_model::columns::{HOSTTYPE_SHORTHAND, QC_NOTE, SAMPLE_NAME, SAMPLETYPE_SHORTHAND};
use metafill_transform::MetadataFrame;
use polars::prelude::{DataFrame, PolarsResult};
use serde::Serialize;
use tracing::debug;

use crate::checks::check_cell;

/// One rule failure for one field of one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    pub sample_name: String,
    pub field_name: String,
    pub error_message: String,
}

/// Validates every qualifying row of a populated table against the fields
/// of its resolved host and sample type.
///
/// Rows with a non-empty `qc_note`, or whose tags are unknown, are skipped.
pub fn validate_records(
    config: &ResolvedConfig,
    data: &DataFrame,
) -> PolarsResult<Vec<ValidationMessage>> {
    let frame = MetadataFrame::from_dataframe(data)?;
    let mut messages = Vec::new();

    for row in 0..frame.height() {
        if frame.get(row, QC_NOTE).is_some_and(|note| !note.is_empty()) {
            continue;
        }
        let (Some(host_type), Some(sample_type)) = (
            frame.get(row, HOSTTYPE_SHORTHAND),
            frame.get(row, SAMPLETYPE_SHORTHAND),
        ) else {
            continue;
        };
        let Some(sample) = config
            .host(host_type)
            .and_then(|host| host.sample_type(sample_type))
        else {
            continue;
        };

        let sample_name = frame.get(row, SAMPLE_NAME).unwrap_or_default();
        for (field_name, definition) in &sample.metadata_fields {
            for error_message in check_cell(definition, frame.get(row, field_name)) {
                messages.push(ValidationMessage {
                    sample_name: sample_name.to_string(),
                    field_name: field_name.clone(),
                    error_message,
                });
            }
        }
    }

    debug!(rows = frame.height(), messages = messages.len(), "validated records");
    Ok(messages)
}
