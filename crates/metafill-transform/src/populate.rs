//! Row populator: fills a sample metadata table from a resolved config.
//!
//! Steps, in order: required-column resolution, pre-transformers, per-host
//! and per-sample-type field filling, host default fill, post-transformers,
//! sentinel replacement, output composition.

use indexmap::IndexMap;
use metafill_model::columns::{
    EMPTY_TAG, HOSTTYPE_SHORTHAND, INTERNAL_COLUMNS, INVALID_HOST_TYPE, INVALID_SAMPLE_TYPE,
    LEAVE_BLANK, QC_NOTE, SAMPLE_NAME, SAMPLETYPE_SHORTHAND, is_internal_column,
};
use metafill_model::{ResolvedConfig, ResolvedHost, TransformerPhase, render_value};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::error::PopulateError;
use crate::frame::MetadataFrame;
use crate::registry::TransformerRegistry;

/// Caller-supplied knobs for [`populate`].
#[derive(Debug, Clone)]
pub struct PopulateOptions {
    /// Column holding the host type, overriding config alternates.
    pub hosttype_column: Option<String>,
    /// Column holding the sample type, overriding config alternates.
    pub sampletype_column: Option<String>,
    pub transformers: TransformerRegistry,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            hosttype_column: None,
            sampletype_column: None,
            transformers: TransformerRegistry::with_builtins(),
        }
    }
}

/// A row that failed host-type or sample-type qualification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualificationFailure {
    pub sample_name: String,
    pub host_type: String,
    pub sample_type: String,
    pub qc_note: String,
}

#[derive(Debug, Clone)]
pub struct PopulateResult {
    /// Every input row, valid hosts first, with internal columns last.
    pub data: DataFrame,
    pub failures: Vec<QualificationFailure>,
}

impl PopulateResult {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Populates a copy of `data` according to `config`.
pub fn populate(
    config: &ResolvedConfig,
    data: &DataFrame,
    options: &PopulateOptions,
) -> Result<PopulateResult, PopulateError> {
    let span = info_span!("populate", rows = data.height());
    let _guard = span.enter();

    let mut frame = MetadataFrame::from_dataframe(data)?;
    prepare_required_columns(&mut frame, config, options)?;

    apply_transformers(&mut frame, config, &options.transformers, TransformerPhase::Pre)?;
    let row_order = fill_from_config(&mut frame, config);
    apply_transformers(&mut frame, config, &options.transformers, TransformerPhase::Post)?;
    frame.map_cells(|cell| {
        if cell.as_deref() == Some(LEAVE_BLANK) {
            *cell = Some(String::new());
        }
    });

    let output = compose_output(&frame, &row_order);
    let failures = collect_failures(&output);
    info!(
        rows = output.height(),
        columns = output.column_names().count(),
        failures = failures.len(),
        "populated metadata"
    );
    Ok(PopulateResult {
        data: output.to_dataframe()?,
        failures,
    })
}

fn prepare_required_columns(
    frame: &mut MetadataFrame,
    config: &ResolvedConfig,
    options: &PopulateOptions,
) -> Result<(), PopulateError> {
    let host_column = resolve_tag_column(
        frame,
        HOSTTYPE_SHORTHAND,
        options.hosttype_column.as_deref(),
        &config.hosttype_column_options,
    )?;
    let sample_column = resolve_tag_column(
        frame,
        SAMPLETYPE_SHORTHAND,
        options.sampletype_column.as_deref(),
        &config.sampletype_column_options,
    )?;

    let (Some(host_column), Some(sample_column), true) =
        (&host_column, &sample_column, frame.contains(SAMPLE_NAME))
    else {
        let mut columns = Vec::new();
        if !frame.contains(SAMPLE_NAME) {
            columns.push(SAMPLE_NAME.to_string());
        }
        if host_column.is_none() {
            columns.push(HOSTTYPE_SHORTHAND.to_string());
        }
        if sample_column.is_none() {
            columns.push(SAMPLETYPE_SHORTHAND.to_string());
        }
        return Err(PopulateError::MissingRequiredColumns { columns });
    };

    let missing_names = frame
        .column(SAMPLE_NAME)
        .map_or(0, |values| values.iter().filter(|v| v.is_none()).count());
    if missing_names > 0 {
        return Err(PopulateError::NanSampleName {
            count: missing_names,
        });
    }

    copy_tag_column(frame, host_column, HOSTTYPE_SHORTHAND);
    copy_tag_column(frame, sample_column, SAMPLETYPE_SHORTHAND);
    frame.insert_column(QC_NOTE, vec![Some(String::new()); frame.height()]);
    Ok(())
}

/// Effective name of a tag column: explicit override, then canonical, then
/// the first configured alternate present in the table.
fn resolve_tag_column(
    frame: &MetadataFrame,
    canonical: &str,
    override_column: Option<&str>,
    alternates: &[String],
) -> Result<Option<String>, PopulateError> {
    if let Some(column) = override_column {
        if !frame.contains(column) {
            return Err(PopulateError::ColumnNotFound {
                column: column.to_string(),
            });
        }
        return Ok(Some(column.to_string()));
    }
    let present_alternate = alternates
        .iter()
        .find(|alternate| alternate.as_str() != canonical && frame.contains(alternate));
    if frame.contains(canonical) {
        if let Some(alternate) = present_alternate {
            warn!(
                canonical,
                alternate = %alternate,
                "both canonical and alternate columns present; using canonical"
            );
        }
        return Ok(Some(canonical.to_string()));
    }
    Ok(present_alternate.cloned())
}

/// Copies `source` into `canonical`, tagging missing cells as `empty`.
fn copy_tag_column(frame: &mut MetadataFrame, source: &str, canonical: &str) {
    let values = frame
        .column(source)
        .map(|values| {
            values
                .iter()
                .map(|v| Some(v.clone().unwrap_or_else(|| EMPTY_TAG.to_string())))
                .collect()
        })
        .unwrap_or_default();
    if source != canonical {
        debug!(source, canonical, "using alternate tag column");
    }
    frame.insert_column(canonical, values);
}

fn apply_transformers(
    frame: &mut MetadataFrame,
    config: &ResolvedConfig,
    registry: &TransformerRegistry,
    phase: TransformerPhase,
) -> Result<(), PopulateError> {
    let Some(transformers) = config.metadata_transformers.phase(phase) else {
        return Ok(());
    };
    for (target, definition) in transformers {
        let Some(function) = registry.get(&definition.function) else {
            return Err(PopulateError::UnknownTransformer {
                target: target.clone(),
                function: definition.function.clone(),
            });
        };
        let missing: Vec<&str> = definition
            .sources
            .iter()
            .map(String::as_str)
            .filter(|source| !frame.contains(source))
            .collect();
        if !missing.is_empty() {
            warn!(
                phase = phase.key(),
                target = %target,
                function = %definition.function,
                missing = ?missing,
                "skipping transformer; source columns absent"
            );
            continue;
        }

        let overwrite = definition
            .overwrite_non_nans
            .unwrap_or_else(|| config.overwrite_non_nans());
        // Computed against the unmodified frame so a target that is also a
        // source reads its original values.
        let mut updates = Vec::new();
        for row in 0..frame.height() {
            if !overwrite && frame.get(row, target).is_some() {
                continue;
            }
            let value = function(&frame.row(row), &definition.sources).map_err(|source| {
                PopulateError::Transform {
                    target: target.clone(),
                    function: definition.function.clone(),
                    sample_name: frame.get(row, SAMPLE_NAME).unwrap_or_default().to_string(),
                    source,
                }
            })?;
            updates.push((row, value));
        }
        frame.ensure_column(target);
        debug!(
            phase = phase.key(),
            target = %target,
            function = %definition.function,
            rows = updates.len(),
            "applied transformer"
        );
        for (row, value) in updates {
            frame.set(row, target, value);
        }
    }
    Ok(())
}

/// Fills fields for every host partition and returns the output row order.
///
/// Host defaults are applied once every partition has contributed its
/// columns, so each qualifying row sees the full column set.
fn fill_from_config(frame: &mut MetadataFrame, config: &ResolvedConfig) -> Vec<usize> {
    let host_groups = group_rows(frame, HOSTTYPE_SHORTHAND, 0..frame.height());
    let mut valid_rows = Vec::with_capacity(frame.height());
    let mut invalid_rows = Vec::new();
    let mut pending_defaults = Vec::new();

    for (host_type, rows) in host_groups {
        match config.host(&host_type) {
            Some(host) => {
                let (ordered, qualified) = fill_host(frame, config, &host_type, host, &rows);
                valid_rows.extend(ordered);
                if let Some(default) = config.effective_default(host).and_then(render_value) {
                    pending_defaults.push((default, qualified));
                }
            }
            None => {
                debug!(host_type = %host_type, rows = rows.len(), "unknown host type");
                mark_rows(frame, &rows, INVALID_HOST_TYPE);
                invalid_rows.extend(rows);
            }
        }
    }

    let columns: Vec<String> = frame.column_names().map(str::to_string).collect();
    for (default, rows) in pending_defaults {
        for column in &columns {
            write_rows(frame, column, &rows, &default, false);
        }
    }

    valid_rows.extend(invalid_rows);
    valid_rows
}

/// Applies sample-type fields to one host partition. Returns the partition's
/// rows in output order and the subset that qualified.
fn fill_host(
    frame: &mut MetadataFrame,
    config: &ResolvedConfig,
    host_type: &str,
    host: &ResolvedHost,
    rows: &[usize],
) -> (Vec<usize>, Vec<usize>) {
    let overwrite = config.effective_overwrite_non_nans(host);
    let leave_blank = config.effective_leave_requireds_blank(host);
    let mut ordered = Vec::with_capacity(rows.len());
    let mut qualified = Vec::with_capacity(rows.len());

    let sample_groups = group_rows(frame, SAMPLETYPE_SHORTHAND, rows.iter().copied());
    for (sample_type, sample_rows) in sample_groups {
        ordered.extend_from_slice(&sample_rows);
        let Some(sample) = host.sample_type(&sample_type) else {
            debug!(
                host_type,
                sample_type = %sample_type,
                rows = sample_rows.len(),
                "unknown sample type"
            );
            mark_rows(frame, &sample_rows, INVALID_SAMPLE_TYPE);
            continue;
        };

        for (name, definition) in &sample.metadata_fields {
            let fill = match definition.default_value() {
                Some(default) => render_value(default),
                None if definition.is_required() && leave_blank => {
                    Some(LEAVE_BLANK.to_string())
                }
                // left for the host default
                None if definition.is_required() => None,
                None => continue,
            };
            frame.ensure_column(name);
            if let Some(value) = fill {
                write_rows(frame, name, &sample_rows, &value, overwrite);
            }
        }
        qualified.extend(sample_rows);
    }
    (ordered, qualified)
}

fn write_rows(
    frame: &mut MetadataFrame,
    column: &str,
    rows: &[usize],
    value: &str,
    overwrite: bool,
) {
    for &row in rows {
        if overwrite || frame.get(row, column).is_none() {
            frame.set(row, column, Some(value.to_string()));
        }
    }
}

fn mark_rows(frame: &mut MetadataFrame, rows: &[usize], note: &str) {
    for &row in rows {
        frame.set(row, QC_NOTE, Some(note.to_string()));
    }
}

/// Groups row indices by the value in `column`, in order of first appearance.
fn group_rows(
    frame: &MetadataFrame,
    column: &str,
    rows: impl Iterator<Item = usize>,
) -> IndexMap<String, Vec<usize>> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for row in rows {
        let key = frame.get(row, column).unwrap_or(EMPTY_TAG);
        groups.entry(key.to_string()).or_default().push(row);
    }
    groups
}

/// Output column order: `sample_name`, the other non-internal columns sorted,
/// then the internal columns in fixed order.
pub fn output_column_order<'a>(columns: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = columns
        .filter(|name| *name != SAMPLE_NAME && !is_internal_column(name))
        .map(str::to_string)
        .collect();
    names.sort();
    names.insert(0, SAMPLE_NAME.to_string());
    names.extend(INTERNAL_COLUMNS.iter().map(|name| (*name).to_string()));
    names
}

fn compose_output(frame: &MetadataFrame, row_order: &[usize]) -> MetadataFrame {
    let columns = output_column_order(frame.column_names());
    frame.select(row_order, &columns)
}

fn collect_failures(output: &MetadataFrame) -> Vec<QualificationFailure> {
    (0..output.height())
        .filter_map(|row| {
            let note = output.get(row, QC_NOTE).filter(|note| !note.is_empty())?;
            Some(QualificationFailure {
                sample_name: output.get(row, SAMPLE_NAME).unwrap_or_default().to_string(),
                host_type: output.get(row, HOSTTYPE_SHORTHAND).unwrap_or_default().to_string(),
                sample_type: output
                    .get(row, SAMPLETYPE_SHORTHAND)
                    .unwrap_or_default()
                    .to_string(),
                qc_note: note.to_string(),
            })
        })
        .collect()
}
