use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use metafill_ingest::TableFormat;
use metafill_output::OutputOptions;
use metafill_transform::PopulateOptions;

use metafill_cli::pipeline::{ExtendRequest, ExtendResult, resolve, run_extend};

use crate::cli::{ExtendArgs, OutputFormatArg, ResolveArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_extend_command(args: &ExtendArgs) -> Result<ExtendResult> {
    let name_base = match &args.name_base {
        Some(name) => name.clone(),
        None => args
            .raw_metadata
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .with_context(|| format!("derive a name base from {}", args.raw_metadata.display()))?,
    };
    let span = info_span!("study", name_base = %name_base);
    let _guard = span.enter();

    let mut output = OutputOptions::new(&args.output_dir, name_base);
    output.format = match args.format {
        OutputFormatArg::Csv => TableFormat::Csv,
        OutputFormatArg::Tsv => TableFormat::Tsv,
    };
    output.remove_internals = !args.keep_internals;
    output.suppress_empty_fails = args.suppress_empty_fails;

    let request = ExtendRequest {
        raw_metadata: args.raw_metadata.clone(),
        study_config: args.study_config.clone(),
        standards: args.standards.clone(),
        populate: PopulateOptions {
            hosttype_column: args.hosttype_column.clone(),
            sampletype_column: args.sampletype_column.clone(),
            ..PopulateOptions::default()
        },
        output,
    };
    run_extend(&request)
}

pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let config = resolve(
        &args.study_config,
        args.standards.as_deref(),
        args.exclude_internals,
    )?;
    let yaml = serde_yaml::to_string(&config).context("serialize resolved config")?;
    print!("{yaml}");
    Ok(())
}

pub fn run_hosts(args: &ResolveArgs) -> Result<()> {
    let config = resolve(
        &args.study_config,
        args.standards.as_deref(),
        args.exclude_internals,
    )?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Host type"),
        header_cell("Fields"),
        header_cell("Sample types"),
    ]);
    apply_table_style(&mut table);
    for (name, host) in &config.host_type_specific_metadata {
        let sample_types = host
            .sample_type_specific_metadata
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            name.clone(),
            host.metadata_fields.len().to_string(),
            sample_types,
        ]);
    }
    println!("{table}");
    Ok(())
}
