use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use csv::WriterBuilder;
use metafill_ingest::TableFormat;
use metafill_model::columns::{QC_NOTE, is_internal_column};
use metafill_transform::MetadataFrame;
use metafill_validate::ValidationMessage;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::naming::{FAILS_SUFFIX, VALIDATION_ERRORS_SUFFIX, output_path};

/// Where and how to write the files of one run.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    pub name_base: String,
    pub format: TableFormat,
    /// Drop internal columns and move failing rows to a separate fails file.
    pub remove_internals: bool,
    /// Skip the fails and validation-errors files when they would be empty.
    pub suppress_empty_fails: bool,
}

impl OutputOptions {
    pub fn new(output_dir: impl Into<PathBuf>, name_base: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            name_base: name_base.into(),
            format: TableFormat::Csv,
            remove_internals: true,
            suppress_empty_fails: false,
        }
    }
}

/// Files written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub main: PathBuf,
    pub fails: Option<PathBuf>,
    pub validation_errors: Option<PathBuf>,
}

/// Writes the main, fails and validation-errors files stamped with the
/// current local time.
pub fn write_outputs(
    data: &DataFrame,
    messages: &[ValidationMessage],
    options: &OutputOptions,
) -> Result<OutputPaths> {
    write_outputs_at(data, messages, options, Local::now().naive_local())
}

/// [`write_outputs`] with an explicit timestamp.
pub fn write_outputs_at(
    data: &DataFrame,
    messages: &[ValidationMessage],
    options: &OutputOptions,
    timestamp: NaiveDateTime,
) -> Result<OutputPaths> {
    let frame = MetadataFrame::from_dataframe(data).context("read populated table")?;
    std::fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("create {}", options.output_dir.display()))?;
    let path_for = |suffix: &str| {
        output_path(
            &options.output_dir,
            timestamp,
            &options.name_base,
            suffix,
            options.format,
        )
    };

    let mut fails = None;
    let main_frame = if options.remove_internals {
        let (passing, failing) = partition_by_qc_note(&frame);
        let all_columns: Vec<String> = frame.column_names().map(str::to_string).collect();
        if !(failing.is_empty() && options.suppress_empty_fails) {
            let path = path_for(FAILS_SUFFIX);
            write_frame(&frame.select(&failing, &all_columns), &path, options.format)?;
            fails = Some(path);
        }
        let kept: Vec<String> = all_columns
            .into_iter()
            .filter(|name| !is_internal_column(name))
            .collect();
        frame.select(&passing, &kept)
    } else {
        frame
    };

    let main = path_for("");
    write_frame(&main_frame, &main, options.format)?;

    let validation_errors = if messages.is_empty() && options.suppress_empty_fails {
        None
    } else {
        let path = path_for(VALIDATION_ERRORS_SUFFIX);
        write_validation_messages(messages, &path, options.format)?;
        Some(path)
    };

    info!(
        main = %main.display(),
        rows = main_frame.height(),
        validation_errors = messages.len(),
        "wrote outputs"
    );
    Ok(OutputPaths {
        main,
        fails,
        validation_errors,
    })
}

/// Row indices with an empty `qc_note`, then those with a non-empty one.
fn partition_by_qc_note(frame: &MetadataFrame) -> (Vec<usize>, Vec<usize>) {
    (0..frame.height()).partition(|&row| frame.get(row, QC_NOTE).unwrap_or_default().is_empty())
}

/// Writes a table as delimited text. Missing cells are written empty.
pub fn write_table(data: &DataFrame, path: &Path, format: TableFormat) -> Result<()> {
    let frame = MetadataFrame::from_dataframe(data).context("read table")?;
    write_frame(&frame, path, format)
}

fn write_frame(frame: &MetadataFrame, path: &Path, format: TableFormat) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(BufWriter::new(file));

    let columns: Vec<&str> = frame.column_names().collect();
    writer
        .write_record(&columns)
        .with_context(|| format!("write header to {}", path.display()))?;
    for row in 0..frame.height() {
        let record = columns
            .iter()
            .map(|column| frame.get(row, column).unwrap_or_default());
        writer
            .write_record(record)
            .with_context(|| format!("write row {row} to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    debug!(path = %path.display(), rows = frame.height(), "wrote table");
    Ok(())
}

/// Writes one row per validation message. No messages yields an empty file.
pub fn write_validation_messages(
    messages: &[ValidationMessage],
    path: &Path,
    format: TableFormat,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(BufWriter::new(file));
    for message in messages {
        writer
            .serialize(message)
            .with_context(|| format!("write validation message to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
