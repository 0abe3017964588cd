//! Built-in transformer functions.
//!
//! Every built-in takes exactly one source column. A missing source value
//! yields a missing result, and standard missing-value tokens such as
//! `not provided` are passed through unchanged.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::TransformError;
use crate::frame::RowView;

pub const PASS_THROUGH: &str = "pass_through";
pub const TRANSFORM_INPUT_SEX_TO_STD_SEX: &str = "transform_input_sex_to_std_sex";
pub const TRANSFORM_AGE_TO_LIFE_STAGE: &str = "transform_age_to_life_stage";
pub const TRANSFORM_DATE_TO_FORMATTED_DATE: &str = "transform_date_to_formatted_date";

/// Ages strictly below this are `child`.
pub const ADULT_AGE: f64 = 17.0;

const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const MISSING_VALUE_TOKENS: &[&str] = &[
    "not applicable",
    "not collected",
    "not provided",
    "restricted access",
    "missing: control sample",
    "missing: sample group",
    "missing: synthetic construct",
    "missing: lab stock",
    "missing: third party data",
    "missing: data agreement established pre-2023",
    "missing: endangered species",
    "missing: human-identifiable",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d-%b-%Y", "%Y%m%d"];

pub fn is_missing_value_token(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    MISSING_VALUE_TOKENS.contains(&lowered.as_str())
}

fn single_source<'a>(
    row: &RowView<'a>,
    sources: &[String],
) -> Result<Option<&'a str>, TransformError> {
    match sources {
        [source] => Ok(row.get(source)),
        _ => Err(TransformError::SourceCount {
            expected: 1,
            found: sources.len(),
        }),
    }
}

/// Copies the single source value.
pub fn pass_through(
    row: &RowView<'_>,
    sources: &[String],
) -> Result<Option<String>, TransformError> {
    Ok(single_source(row, sources)?.map(str::to_string))
}

/// Normalizes free-text sex to `female`, `male` or `intersex`.
pub fn transform_input_sex_to_std_sex(
    row: &RowView<'_>,
    sources: &[String],
) -> Result<Option<String>, TransformError> {
    let Some(raw) = single_source(row, sources)? else {
        return Ok(None);
    };
    if is_missing_value_token(raw) {
        return Ok(Some(raw.to_string()));
    }
    let standard = match raw.trim().to_ascii_lowercase().as_str() {
        "f" | "female" | "woman" | "women" | "girl" => "female",
        "m" | "male" | "man" | "men" | "boy" => "male",
        "intersex" | "i" => "intersex",
        _ => {
            return Err(TransformError::UnrecognizedValue {
                value: raw.to_string(),
            });
        }
    };
    Ok(Some(standard.to_string()))
}

/// Maps a numeric age to `child` (under 17) or `adult`.
pub fn transform_age_to_life_stage(
    row: &RowView<'_>,
    sources: &[String],
) -> Result<Option<String>, TransformError> {
    let Some(raw) = single_source(row, sources)? else {
        return Ok(None);
    };
    if is_missing_value_token(raw) {
        return Ok(Some(raw.to_string()));
    }
    let age = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|age| age.is_finite())
        .ok_or_else(|| TransformError::UnrecognizedValue {
            value: raw.to_string(),
        })?;
    let stage = if age < ADULT_AGE { "child" } else { "adult" };
    Ok(Some(stage.to_string()))
}

/// Renders a date or date-time as `YYYY-MM-DD HH:MM`.
pub fn transform_date_to_formatted_date(
    row: &RowView<'_>,
    sources: &[String],
) -> Result<Option<String>, TransformError> {
    let Some(raw) = single_source(row, sources)? else {
        return Ok(None);
    };
    if is_missing_value_token(raw) {
        return Ok(Some(raw.to_string()));
    }
    let parsed = parse_datetime(raw.trim()).ok_or_else(|| TransformError::UnrecognizedValue {
        value: raw.to_string(),
    })?;
    Ok(Some(parsed.format(OUTPUT_DATE_FORMAT).to_string()))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
