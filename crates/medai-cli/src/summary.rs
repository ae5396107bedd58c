use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use medai_common::{any_to_string, format_numeric};
use medai_dataset::FinalizeReport;
use medai_ingest::ReadSummary;
use medai_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Source: {}", result.source_directory.display());
    if result.written {
        println!("Output: {}", result.output_path.display());
    } else {
        println!("Output: none (no records extracted)");
    }

    print_counts_table(result);
    print_skipped_table(&result.read);
    print_failed_table(&result.read);
    if let Some(report) = &result.report {
        print_imputation_table(report);
    }
    if let Some(preview) = &result.preview {
        print_preview_table(preview);
    }
}

fn print_counts_table(result: &RunResult) {
    let read = &result.read;
    let mut table = styled_table(vec![header_cell("Stage"), header_cell("Count")]);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Files found"), Cell::new(read.files_found)]);
    table.add_row(vec![Cell::new("Files scanned"), Cell::new(read.files_scanned)]);
    table.add_row(vec![
        Cell::new("Records extracted"),
        Cell::new(read.records_extracted),
    ]);
    table.add_row(vec![
        Cell::new("Files skipped"),
        count_cell(read.skipped.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Files failed"),
        count_cell(read.failed.len(), Color::Red),
    ]);
    if let Some(report) = &result.report {
        table.add_row(vec![
            Cell::new("Non-numeric values dropped"),
            count_cell(report.total_coercion_failures(), Color::Yellow),
        ]);
        table.add_row(vec![
            Cell::new("At risk"),
            Cell::new(report.at_risk),
        ]);
    }
    table.add_row(vec![
        Cell::new("Records written")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.record_count).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_skipped_table(read: &ReadSummary) {
    if read.skipped.is_empty() {
        return;
    }
    let mut table = styled_table(vec![header_cell("File"), header_cell("Reason")]);
    for skipped in &read.skipped {
        table.add_row(vec![
            Cell::new(&skipped.file),
            Cell::new(skipped.reason.to_string()).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Skipped files:");
    println!("{table}");
}

fn print_failed_table(read: &ReadSummary) {
    if !read.has_failures() {
        return;
    }
    let mut table = styled_table(vec![header_cell("File"), header_cell("Error")]);
    for failed in &read.failed {
        table.add_row(vec![
            Cell::new(&failed.file),
            Cell::new(&failed.message).fg(Color::Red),
        ]);
    }
    println!();
    println!("Failed files:");
    println!("{table}");
}

fn print_imputation_table(report: &FinalizeReport) {
    let mut table = styled_table(vec![
        header_cell("Column"),
        header_cell("Strategy"),
        header_cell("Value"),
        header_cell("Filled"),
    ]);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for imputation in &report.imputations {
        table.add_row(vec![
            Cell::new(&imputation.column),
            dim_cell(imputation.strategy.label()),
            Cell::new(format_numeric(imputation.strategy.value())),
            count_cell(imputation.filled, Color::Yellow),
        ]);
    }
    println!();
    println!("Imputation:");
    println!("{table}");
}

fn print_preview_table(preview: &DataFrame) {
    let header = preview
        .get_column_names()
        .iter()
        .map(|name| header_cell(name.as_str()))
        .collect();
    let mut table = styled_table(header);
    for idx in 0..preview.width() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for row in 0..preview.height() {
        let cells: Vec<Cell> = preview
            .get_columns()
            .iter()
            .map(|column| {
                let value = column.get(row).map(any_to_string).unwrap_or_default();
                Cell::new(value)
            })
            .collect();
        table.add_row(cells);
    }
    println!();
    println!("Preview:");
    println!("{table}");
}

fn styled_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table.set_header(header);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
