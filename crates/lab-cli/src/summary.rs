use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lab_model::{AnalysisRow, ExtractionWarning, RecommendationCategory, Status};
use lab_report::{
    ALL_NORMAL_MESSAGE, BarChart, OUT_OF_RANGE_HEADING, no_results_message, text_bar,
};

use crate::types::{AnalyzeResult, DoctorResult, ExtractResult, MarkerListing};

const CHART_WIDTH: usize = 40;

pub fn print_analysis(result: &AnalyzeResult) {
    let report = &result.report;
    println!("Document: {}", result.document.display());
    println!("Range table: {}", report.range_table);
    println!("Pages: {}", result.pages);
    if let Some(outputs) = &result.outputs {
        for path in outputs.paths() {
            println!("Wrote: {}", path.display());
        }
    }
    print_warnings(&report.warnings);

    if report.rows.is_empty() {
        println!();
        println!("{}", no_results_message(report));
        return;
    }

    println!();
    println!("Analysis Results:");
    println!("{}", results_table(&report.rows));

    println!();
    println!("Results Visualization:");
    println!("{}", chart_table(&BarChart::from_rows(&report.rows)));

    println!();
    println!("Key Insights:");
    let abnormal: Vec<_> = report.abnormal_rows().collect();
    if abnormal.is_empty() {
        println!("{ALL_NORMAL_MESSAGE}");
    } else {
        println!("{OUT_OF_RANGE_HEADING}");
        for row in abnormal {
            println!("- {}: {} ({})", row.marker, row.display_value(), row.status);
        }
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("Personalized Recommendations:");
        for category in RecommendationCategory::ALL {
            println!();
            println!("{}", category.title());
            if let Some(notice) = category.notice() {
                println!("  {notice}");
            }
            for item in report.recommendations.category(category) {
                println!("  - {item}");
            }
        }
    }

    println!();
    println!("{}", report.disclaimer);
}

pub fn print_extraction(result: &ExtractResult) {
    println!("Transcript ({} pages):", result.transcript.page_count());
    println!("{}", result.transcript.text().trim_end());
    println!();
    if result.extraction.is_empty() {
        println!("No marker values found in the document.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Marker"), header_cell("Raw"), header_cell("Value")]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for value in &result.extraction.markers {
            table.add_row(vec![
                marker_cell(&value.marker),
                Cell::new(&value.raw),
                Cell::new(value.value),
            ]);
        }
        println!("{table}");
    }
    print_warnings(&result.extraction.warnings);
}

pub fn print_markers(listing: &MarkerListing) {
    println!("Range table: {}", listing.table);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Marker"),
        header_cell("Labels"),
        header_cell("Panel"),
        header_cell("Reference Range"),
        header_cell("Unit"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for (definition, range) in &listing.entries {
        let (range_cell, unit_cell) = match range {
            Some(range) => (Cell::new(range.display_range()), Cell::new(&range.unit)),
            None => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            marker_cell(&definition.name),
            Cell::new(definition.labels.join(", ")),
            Cell::new(definition.panel.as_deref().unwrap_or("-")),
            range_cell,
            unit_cell,
        ]);
    }
    println!("{table}");
}

pub fn print_doctor(result: &DoctorResult) {
    let mut tools = Table::new();
    tools.set_header(vec![
        header_cell("Tool"),
        header_cell("Program"),
        header_cell("Status"),
        header_cell("Hint"),
    ]);
    apply_table_style(&mut tools);
    align_column(&mut tools, 2, CellAlignment::Center);
    for tool in &result.tools {
        let (status, hint) = if tool.available {
            (
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
                dim_cell("-"),
            )
        } else {
            (
                Cell::new("missing").fg(Color::Red).add_attribute(Attribute::Bold),
                Cell::new(tool.hint),
            )
        };
        tools.add_row(vec![
            Cell::new(tool.name),
            Cell::new(tool.program.display()),
            status,
            hint,
        ]);
    }
    println!("{tools}");

    println!();
    println!("Standards: {}", result.standards_root.display());
    let report = &result.standards;
    let mut tables = Table::new();
    tables.set_header(vec![
        header_cell("Range Table"),
        header_cell("Ranges"),
        header_cell("Undefined Markers"),
    ]);
    apply_table_style(&mut tables);
    align_column(&mut tables, 1, CellAlignment::Right);
    for check in &report.tables {
        let undefined = if check.undefined_markers.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(check.undefined_markers.join(", ")).fg(Color::Yellow)
        };
        tables.add_row(vec![Cell::new(&check.name), Cell::new(check.ranges), undefined]);
    }
    println!("{tables}");
    println!(
        "Markers: {}  Rules: {}",
        report.counts.markers, report.counts.rules
    );
    if !report.orphan_rules.is_empty() {
        println!("Rules for unknown markers: {}", report.orphan_rules.join(", "));
    }
    for problem in &report.problems {
        eprintln!("- {problem}");
    }
}

fn print_warnings(warnings: &[ExtractionWarning]) {
    if warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Marker"), header_cell("Raw"), header_cell("Problem")]);
    apply_table_style(&mut table);
    for warning in warnings {
        table.add_row(vec![
            marker_cell(&warning.marker),
            Cell::new(&warning.raw).fg(Color::Yellow),
            Cell::new(&warning.message),
        ]);
    }
    println!();
    println!("Skipped values:");
    println!("{table}");
}

fn results_table(rows: &[AnalysisRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Marker"),
        header_cell("Value"),
        header_cell("Unit"),
        header_cell("Reference Range"),
        header_cell("Status"),
    ]);
    apply_results_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for row in rows {
        table.add_row(vec![
            marker_cell(&row.marker),
            Cell::new(row.display_value()),
            Cell::new(&row.unit),
            Cell::new(&row.range),
            status_cell(row.status),
        ]);
    }
    table
}

fn chart_table(chart: &BarChart) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let max = chart.max_value();
    for bar in &chart.bars {
        table.add_row(vec![
            marker_cell(&bar.marker),
            Cell::new(text_bar(bar.value, max, CHART_WIDTH)).fg(status_color(bar.status)),
            Cell::new(&bar.label),
        ]);
    }
    align_column(&mut table, 2, CellAlignment::Right);
    table
}

/// Terminal color matching the chart's NORMAL green, LOW amber, HIGH red.
fn status_color(status: Status) -> Color {
    match status {
        Status::Normal => Color::Green,
        Status::Low => Color::Yellow,
        Status::High => Color::Red,
    }
}

fn status_cell(status: Status) -> Cell {
    let cell = Cell::new(status.as_str()).fg(status_color(status));
    if status.is_abnormal() {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn marker_cell(marker: &str) -> Cell {
    Cell::new(marker)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_results_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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
