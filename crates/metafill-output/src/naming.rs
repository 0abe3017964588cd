use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use metafill_ingest::TableFormat;

/// Timestamp prefix shared by every file of one run.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub const FAILS_SUFFIX: &str = "_fails";
pub const VALIDATION_ERRORS_SUFFIX: &str = "_validation_errors";

/// Builds `<dir>/<timestamp>_<base><suffix>.<ext>`.
pub fn output_path(
    dir: &Path,
    timestamp: NaiveDateTime,
    name_base: &str,
    suffix: &str,
    format: TableFormat,
) -> PathBuf {
    dir.join(format!(
        "{}_{name_base}{suffix}.{}",
        timestamp.format(TIMESTAMP_FORMAT),
        format.extension()
    ))
}
