use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use metafill_cli::pipeline::ExtendResult;

/// Failures listed individually before the table is truncated.
const MAX_LISTED_FAILURES: usize = 20;

pub fn print_summary(result: &ExtendResult) {
    println!("Output: {}", result.outputs.main.display());
    if let Some(path) = &result.outputs.fails {
        println!("Fails: {}", path.display());
    }
    if let Some(path) = &result.outputs.validation_errors {
        println!("Validation errors: {}", path.display());
    }

    let mut counts = Table::new();
    counts.set_header(vec![
        header_cell("Rows"),
        header_cell("Failed"),
        header_cell("Validation errors"),
    ]);
    apply_table_style(&mut counts);
    for index in 0..3 {
        if let Some(column) = counts.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    counts.add_row(vec![
        Cell::new(result.rows),
        count_cell(result.failures.len()),
        count_cell(result.validation_messages.len()),
    ]);
    println!("{counts}");

    if result.failures.is_empty() {
        return;
    }
    let mut failures = Table::new();
    failures.set_header(vec![
        header_cell("Sample"),
        header_cell("Host type"),
        header_cell("Sample type"),
        header_cell("QC note"),
    ]);
    apply_table_style(&mut failures);
    for failure in result.failures.iter().take(MAX_LISTED_FAILURES) {
        failures.add_row(vec![
            Cell::new(&failure.sample_name),
            Cell::new(&failure.host_type),
            Cell::new(&failure.sample_type),
            Cell::new(&failure.qc_note).fg(Color::Yellow),
        ]);
    }
    println!("{failures}");
    if result.failures.len() > MAX_LISTED_FAILURES {
        println!("... and {} more", result.failures.len() - MAX_LISTED_FAILURES);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    let cell = Cell::new(count);
    if count > 0 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Green)
    }
}
