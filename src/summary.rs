//! Terminal tables for the headless commands.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ev_dashboard::data::{PolicyEvent, SeriesPoint, GOVT_POLICY, YEAR};
use ev_dashboard::metrics::format_thousands;
use ev_dashboard::report::{DashboardReport, FOOTER};

pub fn print_summary(report: &DashboardReport) {
    println!("{}", report.title());
    println!();

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for card in report.metric_cards() {
        table.add_row(vec![
            Cell::new(card.label),
            Cell::new(card.value).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
    println!();

    print_policies(&report.policies);
    println!();
    println!("{FOOTER}");
}

pub fn print_policies(policies: &[PolicyEvent]) {
    if policies.is_empty() {
        println!("No policy events recorded.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell(YEAR), header_cell(GOVT_POLICY)]);
    apply_table_style(&mut table);
    for event in policies {
        table.add_row(vec![Cell::new(event.year), Cell::new(&event.policy)]);
    }
    println!("{table}");
}

pub fn print_series(points: &[SeriesPoint]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(YEAR),
        header_cell("Series"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for point in points {
        table.add_row(vec![
            Cell::new(point.year),
            Cell::new(point.series.column_name()),
            Cell::new(format_thousands(point.value)),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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
