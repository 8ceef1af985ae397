use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use panel_cli::run::{GroupRun, UnionRun};
use panel_core::UnionResult;
use panel_model::{TypeTag, VariableDiagnostic};

pub fn print_union_summary(run: &UnionRun) {
    println!("Output: {}", run.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Years"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Variables"),
        header_cell("OK"),
        header_cell("Type drift"),
        header_cell("Level drift"),
        header_cell("Partial"),
        header_cell("Renamed"),
        header_cell("Written"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 10, CellAlignment::Center);

    let mut total_rows = 0usize;
    for group_run in &run.groups {
        let summary = group_run.result.summary();
        total_rows += summary.rows;
        table.add_row(vec![
            group_cell(&summary.group),
            Cell::new(summary.years.len()),
            Cell::new(summary.rows),
            Cell::new(summary.columns),
            Cell::new(summary.variables),
            Cell::new(summary.okay).fg(Color::Green),
            count_cell(summary.type_drift, Color::Yellow),
            count_cell(summary.level_drift, Color::Yellow),
            count_cell(summary.partial, Color::Yellow),
            count_cell(summary.renamed, Color::Magenta),
            written_cell(group_run),
        ]);
    }
    for failure in &run.failures {
        table.add_row(vec![
            group_cell(&failure.group),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("failed").fg(Color::Red).add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    for group_run in &run.groups {
        print_drift_table(&group_run.result);
    }

    if run.has_errors() {
        eprintln!("Errors:");
        for failure in &run.failures {
            eprintln!("- {}", failure.message);
        }
    }
}

/// Prints every diagnostic of one group (or only drifting ones).
pub fn print_diagnostics(result: &UnionResult, drift_only: bool) {
    let summary = result.summary();
    println!(
        "Group: {} ({} years, {} rows)",
        summary.group,
        summary.years.len(),
        summary.rows
    );
    let diagnostics: Vec<&VariableDiagnostic> = result
        .diagnostics
        .values()
        .filter(|diag| !drift_only || is_drifting(diag))
        .collect();
    if diagnostics.is_empty() {
        println!("No drifting variables.");
        return;
    }
    println!("{}", diagnostic_table(&diagnostics, &summary.years));
}

fn print_drift_table(result: &UnionResult) {
    let drifting: Vec<&VariableDiagnostic> = result
        .diagnostics
        .values()
        .filter(|diag| is_drifting(diag))
        .collect();
    if drifting.is_empty() {
        return;
    }
    println!();
    println!("Drift in {}:", result.group);
    println!(
        "{}",
        diagnostic_table(&drifting, result.combined.year_labels())
    );
}

fn diagnostic_table(diagnostics: &[&VariableDiagnostic], years: &[String]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Variable"), header_cell("Status")];
    header.extend(years.iter().map(|label| header_cell(label)));
    header.push(header_cell("Missing"));
    header.push(header_cell("Level sets"));
    table.set_header(header);
    apply_table_style(&mut table);

    for diag in diagnostics {
        let mut row = vec![Cell::new(&diag.variable), status_cell(diag)];
        row.extend(diag.types_by_year.iter().map(|tag| type_cell(*tag)));
        row.push(count_cell(diag.years_missing, Color::Yellow));
        row.push(if diag.level_set_count == 0 {
            dim_cell("-")
        } else if diag.level_consistent {
            Cell::new(diag.level_set_count)
        } else {
            Cell::new(diag.level_set_count).fg(Color::Yellow)
        });
        table.add_row(row);
    }
    let last = table.column_count().saturating_sub(1);
    align_column(&mut table, last, CellAlignment::Right);
    align_column(&mut table, last.saturating_sub(1), CellAlignment::Right);
    table
}

fn is_drifting(diag: &VariableDiagnostic) -> bool {
    diag.has_type_drift() || diag.has_level_drift() || diag.is_partial()
}

fn status_cell(diag: &VariableDiagnostic) -> Cell {
    if diag.has_type_drift() {
        Cell::new("TYPE").fg(Color::Red).add_attribute(Attribute::Bold)
    } else if diag.is_partial() {
        Cell::new("PARTIAL").fg(Color::Yellow)
    } else if diag.has_level_drift() {
        Cell::new("LEVELS").fg(Color::Yellow)
    } else {
        Cell::new("OK").fg(Color::Green)
    }
}

fn type_cell(tag: Option<TypeTag>) -> Cell {
    match tag {
        Some(TypeTag::Numeric) => Cell::new(TypeTag::Numeric),
        Some(tag) => Cell::new(tag).fg(Color::Blue),
        None => dim_cell("-"),
    }
}

fn written_cell(group_run: &GroupRun) -> Cell {
    match group_run.outputs {
        Some(_) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell("dry run"),
    }
}

fn group_cell(group: &str) -> Cell {
    Cell::new(group)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
