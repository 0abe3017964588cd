//! Column names and cell values with fixed meaning in metadata tables.

pub const SAMPLE_NAME: &str = "sample_name";
pub const HOSTTYPE_SHORTHAND: &str = "hosttype_shorthand";
pub const SAMPLETYPE_SHORTHAND: &str = "sampletype_shorthand";
pub const QC_NOTE: &str = "qc_note";

pub const SAMPLE_TYPE: &str = "sample_type";
pub const QIITA_SAMPLE_TYPE: &str = "qiita_sample_type";

/// Internal columns, in output order.
pub const INTERNAL_COLUMNS: [&str; 3] = [HOSTTYPE_SHORTHAND, SAMPLETYPE_SHORTHAND, QC_NOTE];

/// Written into required fields when `leave_requireds_blank` is set; blanked
/// once all transformers have run.
pub const LEAVE_BLANK: &str = "leaveblank";

/// Stand-in for a missing host-type or sample-type tag.
pub const EMPTY_TAG: &str = "empty";

pub const INVALID_HOST_TYPE: &str = "invalid host_type";
pub const INVALID_SAMPLE_TYPE: &str = "invalid sample_type";

pub fn is_internal_column(name: &str) -> bool {
    INTERNAL_COLUMNS.contains(&name)
}
