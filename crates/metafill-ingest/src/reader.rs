//! Delimited text reading into all-string tables.

use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::format::{InputFormat, TableFormat};
use crate::workbook::read_workbook;

/// Reads a metadata table, choosing the reader from the file extension.
///
/// Every cell is kept as a string so values like `TRUE` or `007` survive
/// unchanged. Empty cells become missing values.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    match InputFormat::from_path(path)? {
        InputFormat::Delimited(format) => read_table_as(path, format),
        InputFormat::Workbook => read_workbook(path),
    }
}

/// Reads a metadata table with an explicit layout.
pub fn read_table_as(path: &Path, format: TableFormat) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let text = decode_text(&bytes, path)?;
    let df = parse_delimited(&text, format, path)?;
    info!(
        path = %path.display(),
        format = %format,
        rows = df.height(),
        columns = df.width(),
        "loaded input table"
    );
    Ok(df)
}

/// Decodes file bytes as UTF-8 (with or without a byte order mark), falling
/// back to Latin-1.
pub fn decode_text(bytes: &[u8], path: &Path) -> Result<String> {
    let body = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) if encoding == UTF_8 => &bytes[bom_length..],
        Some((encoding, _)) => {
            return Err(IngestError::Unreadable {
                path: path.to_path_buf(),
                reason: format!("{} byte order mark", encoding.name()),
            });
        }
        None => bytes,
    };
    if body.contains(&0) {
        return Err(IngestError::Unreadable {
            path: path.to_path_buf(),
            reason: "contains NUL bytes".to_string(),
        });
    }

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        return Ok(text.into_owned());
    }
    debug!(path = %path.display(), "input is not valid UTF-8; decoding as Latin-1");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
    Ok(text.into_owned())
}

/// Parses delimited text into a DataFrame of string columns.
///
/// Short rows are padded with missing values and rows with no content are
/// dropped.
pub fn parse_delimited(text: &str, format: TableFormat, source: &Path) -> Result<DataFrame> {
    let csv_error = |e: csv::Error| IngestError::Csv {
        path: source.to_path_buf(),
        source: e,
    };
    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = record.get(idx).filter(|cell| !cell.is_empty());
            column.push(cell.map(str::to_string));
        }
    }
    if skipped > 0 {
        debug!(path = %source.display(), skipped, "dropped blank rows");
    }

    string_frame(headers, columns)
}

/// Builds a DataFrame of string columns from parallel headers and values.
pub(crate) fn string_frame(
    headers: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
) -> Result<DataFrame> {
    let columns: Vec<Column> = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}
