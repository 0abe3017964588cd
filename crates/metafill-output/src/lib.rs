//! Output files for a populated metadata table.
//!
//! One run writes up to three files sharing a timestamp prefix: the main
//! table, the rows that failed qualification, and the validation messages.

#![deny(unsafe_code)]

mod naming;
mod writer;

pub use naming::{FAILS_SUFFIX, TIMESTAMP_FORMAT, VALIDATION_ERRORS_SUFFIX, output_path};
pub use writer::{
    OutputOptions, OutputPaths, write_outputs, write_outputs_at, write_table,
    write_validation_messages,
};
