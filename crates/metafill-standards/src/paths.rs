//! Standards file path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the standards file.
pub const STANDARDS_ENV_VAR: &str = "METAFILL_STANDARDS";

/// Get the standards file path.
///
/// Resolution order:
/// 1. `METAFILL_STANDARDS` environment variable
/// 2. `standards/standards.yml` relative to workspace root
pub fn default_standards_path() -> PathBuf {
    if let Ok(path) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards/standards.yml")
}
