//! Error types for input table loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading an input table.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {path} has no worksheets")]
    EmptyWorkbook { path: PathBuf },

    /// The bytes could not be decoded as text in any accepted encoding.
    #[error("{path} is not readable as text: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("unsupported input format '{extension}' for {path} (expected csv, tsv, txt or a spreadsheet workbook)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
