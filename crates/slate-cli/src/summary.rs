use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use slate_cli::types::{BatchResult, FileStatus, FileSummary};

pub fn print_summary(result: &BatchResult) {
    if result.dry_run {
        println!("Dry run: no files were written");
    }
    if !result.files.is_empty() {
        print_file_table(result);
        print_skipped_table(&result.files);
    }
    if !result.rejected.is_empty() {
        eprintln!("Rejected:");
        for rejected in &result.rejected {
            eprintln!("- {}: {}", rejected.path.display(), rejected.reason);
        }
    }
    let failures: Vec<&FileSummary> = result
        .files
        .iter()
        .filter(|file| file.status == FileStatus::Failed)
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for file in failures {
            let message = file.error.as_deref().unwrap_or("unknown error");
            eprintln!("- {}: {message}", file.input.display());
        }
    }
}

fn print_file_table(result: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Output"),
        header_cell("Clips"),
        header_cell("Renamed"),
        header_cell("Skipped"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);

    let mut total_clips = 0usize;
    let mut total_renamed = 0usize;
    let mut total_skipped = 0usize;
    for file in &result.files {
        let counts = file.report.as_ref().map(|report| {
            (
                report.clips_seen,
                report.renamed_count(),
                report.skipped_count(),
            )
        });
        if let Some((clips, renamed, skipped)) = counts {
            total_clips += clips;
            total_renamed += renamed;
            total_skipped += skipped;
        }
        table.add_row(vec![
            Cell::new(file_name(&file.input))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            match &file.output {
                Some(path) => Cell::new(file_name(path)),
                None => dim_cell("-"),
            },
            counts.map_or_else(|| dim_cell("-"), |(clips, _, _)| Cell::new(clips)),
            counts.map_or_else(|| dim_cell("-"), |(_, renamed, _)| Cell::new(renamed)),
            count_cell(counts.map(|(_, _, skipped)| skipped), Color::Yellow),
            status_cell(file.status),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} files", result.files.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_clips).add_attribute(Attribute::Bold),
        Cell::new(total_renamed).add_attribute(Attribute::Bold),
        count_cell(Some(total_skipped), Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

/// One row per skipped clip, so unexpected metadata is easy to find.
fn print_skipped_table(files: &[FileSummary]) {
    let mut rows = Vec::new();
    for file in files {
        let Some(report) = file.report.as_ref() else {
            continue;
        };
        for skipped in &report.skipped {
            rows.push((file_name(&file.input), skipped));
        }
    }
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Clip"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    for (file, skipped) in rows {
        table.add_row(vec![
            Cell::new(file),
            match &skipped.clip_id {
                Some(id) => Cell::new(id),
                None => dim_cell("-"),
            },
            Cell::new(skipped.reason.to_string()).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Skipped clips:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        })
}

fn status_cell(status: FileStatus) -> Cell {
    match status {
        FileStatus::Written => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        FileStatus::DryRun => Cell::new(status.label()).fg(Color::Cyan),
        FileStatus::Failed => Cell::new(status.label())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
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
