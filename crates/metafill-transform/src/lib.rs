//! Populates sample metadata tables from a resolved configuration.

pub mod builtins;
pub mod error;
pub mod frame;
pub mod populate;
pub mod registry;

pub use error::{PopulateError, TransformError};
pub use frame::{MetadataFrame, RowView};
pub use populate::{
    PopulateOptions, PopulateResult, QualificationFailure, output_column_order, populate,
};
pub use registry::{TransformFn, TransformerRegistry};
