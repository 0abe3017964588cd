//! Field-level validation of populated sample metadata.

pub mod checks;
mod validator;

pub use checks::{check_cell, matches_type};
pub use validator::{ValidationMessage, validate_records};
