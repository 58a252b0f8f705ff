use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dtm_core::{Notification, NotificationLevel, Projection, TableSummary};
use dtm_model::{AGE, CellValue, Column, PAGE_SIZE};

/// One page of rows under the visible column labels.
pub fn projection_table(projection: &Projection<'_>, columns: &[Column]) -> Table {
    let visible: Vec<&Column> = columns.iter().filter(|column| column.visible).collect();
    let mut table = Table::new();
    let mut header = vec![header_cell("Id")];
    header.extend(visible.iter().map(|column| header_cell(&column.label)));
    table.set_header(header);
    apply_table_style(&mut table);

    for (index, column) in visible.iter().enumerate() {
        if column.id == AGE {
            align_column(&mut table, index + 1, CellAlignment::Right);
        }
    }
    for row in &projection.rows {
        let mut cells = vec![dim_cell(row.id())];
        cells.extend(visible.iter().map(|column| match row.get(&column.id) {
            Some(value) => value_cell(&value),
            None => dim_cell("-"),
        }));
        table.add_row(cells);
    }
    table
}

/// Columns in display order with their position, id, and flags.
pub fn columns_table(columns: &[Column]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Id"),
        header_cell("Label"),
        header_cell("Visible"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    for (index, column) in columns.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&column.id),
            Cell::new(&column.label),
            flag_cell(column.visible),
            flag_cell(column.is_default()),
        ]);
    }
    table
}

/// Paging line under the table, e.g. `Rows 11-20 of 26 (page 2 of 3)`.
pub fn paging_line(projection: &Projection<'_>) -> String {
    if projection.filtered_count == 0 {
        return "No matching rows".to_string();
    }
    let first = projection.page * PAGE_SIZE + 1;
    let last = first + projection.rows.len().saturating_sub(1);
    format!(
        "Rows {first}-{last} of {} (page {} of {})",
        projection.filtered_count,
        projection.page + 1,
        projection.page_count
    )
}

pub fn summary_line(summary: &TableSummary) -> String {
    format!(
        "{} rows, {} of {} columns visible",
        summary.total_rows, summary.visible_columns, summary.total_columns
    )
}

pub fn notification_line(notification: &Notification) -> String {
    match notification.level {
        NotificationLevel::Success => format!("✓ {}", notification.message),
        NotificationLevel::Warning => format!("warning: {}", notification.message),
        NotificationLevel::Error => format!("error: {}", notification.message),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
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

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Number(n) if n.is_nan() => Cell::new("NaN").fg(Color::Red),
        other => Cell::new(other),
    }
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtm_core::ViewState;
    use dtm_model::seed_rows;

    #[test]
    fn test_paging_line() {
        let rows = seed_rows();
        let mut view = ViewState::new();
        view.set_page(2);
        insta::assert_snapshot!(paging_line(&view.project(&rows)), @"Rows 21-26 of 26 (page 3 of 3)");

        view.set_search("nobody-matches-this");
        assert_eq!(paging_line(&view.project(&rows)), "No matching rows");
    }

    #[test]
    fn test_summary_line() {
        let summary = TableSummary {
            total_rows: 26,
            total_columns: 5,
            visible_columns: 4,
            editing_rows: 0,
        };
        insta::assert_snapshot!(summary_line(&summary), @"26 rows, 4 of 5 columns visible");
    }

    #[test]
    fn test_notification_line() {
        assert_eq!(
            notification_line(&Notification::success("Successfully imported 3 rows!")),
            "✓ Successfully imported 3 rows!"
        );
        assert_eq!(
            notification_line(&Notification::error("boom")),
            "error: boom"
        );
    }

    #[test]
    fn test_projection_table_shows_visible_labels() {
        let rows = seed_rows();
        let mut columns = dtm_model::default_columns();
        columns[1].visible = false;
        let projection = ViewState::new().project(&rows);
        let rendered = projection_table(&projection, &columns).to_string();
        assert!(rendered.contains("Name"));
        assert!(!rendered.contains("Email"));
        assert!(rendered.contains("John Doe"));
        assert!(!rendered.contains("john@example.com"));
    }
}
