use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use clinic_cli::render::{PREVIEW_HEADER, heatmap_header, metric_rows, preview_row, risk_rows};
use clinic_engine::{DashboardSnapshot, DepartmentCount, Heatmap, format_percent, percentage};
use clinic_model::Appointment;

pub fn print_summary(snapshot: &DashboardSnapshot) {
    println!(
        "Appointments: {} shown of {} loaded",
        snapshot.metrics.total, snapshot.total_records
    );
    println!("{}", key_value_table("Metric", metric_rows(&snapshot.metrics)));
    println!(
        "{}",
        department_table(&snapshot.department_counts, snapshot.metrics.total)
    );
    println!(
        "{}",
        key_value_table(
            "Risk",
            risk_rows(snapshot.risk.as_ref(), &snapshot.reallocation)
        )
    );
    println!("No-show heatmap (department x age)");
    println!("{}", heatmap_table(&snapshot.heatmap));
}

pub fn print_preview(records: &[&Appointment]) {
    let mut table = Table::new();
    table.set_header(PREVIEW_HEADER.iter().map(|label| header_cell(label)));
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for record in records {
        let mut row: Vec<Cell> = preview_row(record).into_iter().map(Cell::new).collect();
        if record.is_no_show() {
            row[5] = Cell::new(record.status).fg(Color::Red);
        }
        table.add_row(row);
    }
    println!("{table}");
}

fn key_value_table(title: &str, rows: Vec<(&'static str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(title), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

fn department_table(counts: &[DepartmentCount], total: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Department"),
        header_cell("Appointments"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in counts {
        table.add_row(vec![
            Cell::new(entry.department).fg(Color::Blue),
            count_cell(entry.count, Color::White),
            dim_cell(format_percent(percentage(entry.count, total))),
        ]);
    }
    table
}

fn heatmap_table(heatmap: &Heatmap) -> Table {
    let mut table = Table::new();
    table.set_header(heatmap_header().iter().map(|label| header_cell(label)));
    apply_grid_style(&mut table);
    let max = heatmap.max_count();
    for (department, row) in heatmap.dense_grid() {
        let mut cells = vec![Cell::new(department).fg(Color::Blue)];
        cells.extend(row.iter().map(|&count| heat_cell(count, max)));
        table.add_row(cells);
    }
    for index in 1..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    if heatmap.unbinned() > 0 {
        table.add_row(vec![
            dim_cell("unbinned"),
            Cell::new(heatmap.unbinned()).fg(Color::Yellow),
        ]);
    }
    table
}

/// Upper third of the range is red, middle third yellow, the rest plain.
fn heat_cell(count: usize, max: usize) -> Cell {
    if count == 0 {
        return dim_cell(0);
    }
    let cell = Cell::new(count);
    if count * 3 > max * 2 {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    } else if count * 3 > max {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_grid_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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
