use polars::prelude::PolarsError;
use thiserror::Error;

/// Failure raised by a single transformer call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("expected {expected} source column(s), got {found}")]
    SourceCount { expected: usize, found: usize },

    #[error("unrecognized value '{value}'")]
    UnrecognizedValue { value: String },

    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Error)]
pub enum PopulateError {
    #[error("input is missing required column(s): {}", .columns.join(", "))]
    MissingRequiredColumns { columns: Vec<String> },

    #[error("{count} row(s) have no sample_name")]
    NanSampleName { count: usize },

    #[error("unknown transformer function '{function}' for field '{target}'")]
    UnknownTransformer { target: String, function: String },

    #[error("column '{column}' not found in input")]
    ColumnNotFound { column: String },

    #[error("transformer '{function}' failed for field '{target}' of sample '{sample_name}': {source}")]
    Transform {
        target: String,
        function: String,
        sample_name: String,
        #[source]
        source: TransformError,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
