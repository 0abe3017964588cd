//! Loading of raw sample metadata tables.
//!
//! Inputs are comma or tab separated text or spreadsheet workbooks. All cells
//! load as strings so the populator sees exactly what the submitter typed.

#![deny(unsafe_code)]

pub mod error;
mod format;
mod reader;
mod workbook;

pub use error::{IngestError, Result};
pub use format::{InputFormat, TableFormat};
pub use reader::{decode_text, parse_delimited, read_table, read_table_as};
pub use workbook::read_workbook;
