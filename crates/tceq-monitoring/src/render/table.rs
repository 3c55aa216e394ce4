use crate::report::views::{FiscalYearEntry, ProjectYearEntry, VanSummaryView};
use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};

fn base_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn right_align(table: &mut Table, columns: &[usize]) {
    for &index in columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

/// The regional van summary: distinct investigations and the span of status dates.
pub fn van_summary_table(view: &VanSummaryView) -> Table {
    let mut table = base_table(vec![
        "Distinct investigations",
        "First status date",
        "Last status date",
    ]);
    table.add_row(vec![
        view.distinct_investigations.to_string(),
        format_date(view.first_status_date),
        format_date(view.last_status_date),
    ]);
    right_align(&mut table, &[0]);
    table
}

pub fn project_year_table(entries: &[ProjectYearEntry]) -> Table {
    let mut table = base_table(vec!["Year", "Type", "Projects", "Monitoring days"]);
    for entry in entries {
        table.add_row(vec![
            entry.year.to_string(),
            entry.project_type_label.to_string(),
            entry.projects.to_string(),
            entry.monitoring_days.to_string(),
        ]);
    }
    right_align(&mut table, &[2, 3]);
    table
}

pub fn onsite_table(entries: &[FiscalYearEntry]) -> Table {
    let mut table = base_table(vec!["Fiscal year", "Category", "Investigations"]);
    for entry in entries {
        table.add_row(vec![
            format!("FY{}", entry.fiscal_year),
            entry.category_label.to_string(),
            entry.investigations.to_string(),
        ]);
    }
    right_align(&mut table, &[2]);
    table
}
