//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "metafill",
    version,
    about = "Extend sample metadata tables from hierarchical host and sample type standards",
    long_about = "Extend sample metadata tables from hierarchical host and sample type standards.\n\n\
                  A study config is folded into the standards, every row is filled with the\n\
                  defaults for its host type and sample type, and the result is validated."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Populate a raw metadata table and write the extended outputs.
    Extend(ExtendArgs),

    /// Print the resolved config for a study as YAML.
    Resolve(ResolveArgs),

    /// List resolved host types and their sample types.
    Hosts(ResolveArgs),
}

#[derive(Parser)]
pub struct ExtendArgs {
    /// Raw metadata table (.csv, .tsv, .txt or a spreadsheet workbook).
    #[arg(value_name = "RAW_METADATA")]
    pub raw_metadata: PathBuf,

    /// Study-specific config (YAML).
    #[arg(value_name = "STUDY_CONFIG")]
    pub study_config: PathBuf,

    /// Output directory (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Base name for output files (default: raw metadata file stem).
    #[arg(long = "name-base", value_name = "NAME")]
    pub name_base: Option<String>,

    /// Output file format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Standards file (default: $METAFILL_STANDARDS or the bundled standards).
    #[arg(long = "standards", value_name = "PATH")]
    pub standards: Option<PathBuf>,

    /// Keep internal columns and failing rows in the main output.
    #[arg(long = "keep-internals")]
    pub keep_internals: bool,

    /// Do not write fails or validation-errors files when they would be empty.
    #[arg(long = "suppress-empty-fails")]
    pub suppress_empty_fails: bool,

    /// Column holding the host type, overriding config alternates.
    #[arg(long = "hosttype-column", value_name = "COLUMN")]
    pub hosttype_column: Option<String>,

    /// Column holding the sample type, overriding config alternates.
    #[arg(long = "sampletype-column", value_name = "COLUMN")]
    pub sampletype_column: Option<String>,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Study-specific config (YAML).
    #[arg(value_name = "STUDY_CONFIG")]
    pub study_config: PathBuf,

    /// Standards file (default: $METAFILL_STANDARDS or the bundled standards).
    #[arg(long = "standards", value_name = "PATH")]
    pub standards: Option<PathBuf>,

    /// Leave out host and sample types whose names start with an underscore.
    #[arg(long = "exclude-internals")]
    pub exclude_internals: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Tsv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
