//! Metadata extension pipeline with explicit stages.
//!
//! 1. **Resolve**: load the study config and fold it into the standards
//! 2. **Ingest**: read the raw metadata table
//! 3. **Populate**: fill fields and qualify rows
//! 4. **Validate**: check populated cells against field rules
//! 5. **Output**: write the main, fails and validation-errors files
//!
//! Stages 3 and 4 touch no files and are exposed together as
//! [`extend_metadata`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use metafill_ingest::read_table;
use metafill_model::ResolvedConfig;
use metafill_output::{OutputOptions, OutputPaths, write_outputs};
use metafill_standards::{build_resolved_config, load_config};
use metafill_transform::{PopulateOptions, QualificationFailure, populate};
use metafill_validate::{ValidationMessage, validate_records};

// ============================================================================
// Stage 1: Resolve
// ============================================================================

/// Resolves a study config file against the bundled software defaults and
/// a standards file (the default location when `standards` is `None`).
pub fn resolve(
    study_config: &Path,
    standards: Option<&Path>,
    exclude_internals: bool,
) -> Result<ResolvedConfig> {
    let span = info_span!("resolve", study_config = %study_config.display());
    let _guard = span.enter();

    let study = load_config(study_config)
        .with_context(|| format!("load study config {}", study_config.display()))?;
    let config = build_resolved_config(&study, None, standards, exclude_internals)
        .context("resolve study config")?;
    info!(
        host_types = config.host_type_specific_metadata.len(),
        "resolved config"
    );
    Ok(config)
}

// ============================================================================
// Stages 3-4: Populate and validate
// ============================================================================

/// Populated table with its row-level and field-level findings.
#[derive(Debug, Clone)]
pub struct ExtendOutcome {
    pub data: DataFrame,
    pub failures: Vec<QualificationFailure>,
    pub validation_messages: Vec<ValidationMessage>,
}

/// Populates `raw` from `config` and validates the rows that qualified.
pub fn extend_metadata(
    raw: &DataFrame,
    config: &ResolvedConfig,
    options: &PopulateOptions,
) -> Result<ExtendOutcome> {
    let populated = populate(config, raw, options).context("populate metadata")?;
    let validation_messages =
        validate_records(config, &populated.data).context("validate populated metadata")?;
    info!(
        rows = populated.data.height(),
        failures = populated.failures.len(),
        validation_messages = validation_messages.len(),
        "extended metadata"
    );
    Ok(ExtendOutcome {
        data: populated.data,
        failures: populated.failures,
        validation_messages,
    })
}

// ============================================================================
// Full run
// ============================================================================

/// Inputs and output settings for [`run_extend`].
#[derive(Debug, Clone)]
pub struct ExtendRequest {
    pub raw_metadata: PathBuf,
    pub study_config: PathBuf,
    pub standards: Option<PathBuf>,
    pub populate: PopulateOptions,
    pub output: OutputOptions,
}

/// Summary of a completed [`run_extend`].
#[derive(Debug, Clone)]
pub struct ExtendResult {
    pub rows: usize,
    pub failures: Vec<QualificationFailure>,
    pub validation_messages: Vec<ValidationMessage>,
    pub outputs: OutputPaths,
}

/// Runs every stage and writes the output files.
///
/// Rows failing qualification and cells failing validation are reported in
/// the result and the output files; only fatal problems return `Err`.
pub fn run_extend(request: &ExtendRequest) -> Result<ExtendResult> {
    let span = info_span!("extend", raw_metadata = %request.raw_metadata.display());
    let _guard = span.enter();

    let config = resolve(&request.study_config, request.standards.as_deref(), false)?;
    let raw = read_table(&request.raw_metadata)
        .with_context(|| format!("read {}", request.raw_metadata.display()))?;
    let outcome = extend_metadata(&raw, &config, &request.populate)?;
    let outputs = write_outputs(&outcome.data, &outcome.validation_messages, &request.output)
        .context("write outputs")?;

    Ok(ExtendResult {
        rows: outcome.data.height(),
        failures: outcome.failures,
        validation_messages: outcome.validation_messages,
        outputs,
    })
}
