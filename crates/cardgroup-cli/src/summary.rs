//! Terminal tables for boards, analytics and replay failures.

use cardgroup_engine::ItemStats;
use cardgroup_model::Board;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::replay::ReplayReport;

/// One row per group in board order, members joined in display order,
/// followed by a `TOTAL` row.
pub fn board_table(board: &Board) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Id"),
        header_cell("Items"),
        header_cell("Members"),
    ]);
    apply_board_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in &board.groups {
        let members: Vec<&str> = board
            .items
            .iter()
            .filter(|item| item.group_id == group.id)
            .map(|item| item.text.as_str())
            .collect();
        let members_cell = if members.is_empty() {
            dim_cell("(empty)")
        } else {
            Cell::new(members.join(", "))
        };
        table.add_row(vec![
            Cell::new(&group.title).add_attribute(Attribute::Bold),
            dim_cell(&group.id),
            count_cell(members.len()),
            members_cell,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(board.items.len()).add_attribute(Attribute::Bold),
        dim_cell(format!("{} groups", board.groups.len())),
    ]);
    table
}

pub fn stats_table(stats: &ItemStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total items"), Cell::new(stats.total_items)]);
    table.add_row(vec![Cell::new("Unique groups"), Cell::new(stats.unique_groups)]);
    table.add_row(vec![Cell::new("Unique colors"), Cell::new(stats.unique_colors)]);
    table.add_row(vec![
        Cell::new("Avg per group"),
        Cell::new(format!("{:.1}", stats.avg_items_per_group)),
    ]);
    table.add_row(vec![Cell::new("Max in group"), Cell::new(stats.max_items_in_group)]);
    table.add_row(vec![Cell::new("Min in group"), Cell::new(stats.min_items_in_group)]);
    table
}

/// Per-group item counts, or `None` for a board without items.
pub fn group_counts_table(stats: &ItemStats) -> Option<Table> {
    if stats.group_counts.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Group"), header_cell("Items")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (group, count) in &stats.group_counts {
        table.add_row(vec![Cell::new(group), count_cell(*count)]);
    }
    Some(table)
}

pub fn replay_summary_line(report: &ReplayReport) -> String {
    format!(
        "Applied {} messages: {} changed, {} unchanged, {} failed",
        report.total(),
        report.changed,
        report.unchanged,
        report.failures.len()
    )
}

/// Rejected messages with their script position, or `None` when every
/// message applied.
pub fn failure_table(report: &ReplayReport) -> Option<Table> {
    if report.failures.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Operation"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for failure in &report.failures {
        table.add_row(vec![
            Cell::new(failure.index),
            Cell::new(failure.op),
            Cell::new(failure.error.to_string()).fg(Color::Red),
        ]);
    }
    Some(table)
}

pub fn print_board(board: &Board) {
    println!("{}", board_table(board));
}

pub fn print_stats(stats: &ItemStats) {
    println!("{}", stats_table(stats));
    if let Some(counts) = group_counts_table(stats) {
        println!("{counts}");
    }
}

pub fn print_replay_report(report: &ReplayReport) {
    println!("{}", replay_summary_line(report));
    if let Some(failures) = failure_table(report) {
        eprintln!("{failures}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_board_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
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
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardgroup_engine::ItemQueries;
    use cardgroup_model::{Group, GroupId, Item, ItemId};

    fn board() -> Board {
        let tasks = GroupId::new("tasks").unwrap();
        Board::new(
            vec![
                Group::new(tasks.clone(), "Tasks", "#e3f2fd"),
                Group::new(GroupId::new("later").unwrap(), "Later", "#f3e5f5"),
            ],
            vec![Item::new(ItemId::new("1").unwrap(), "Task 1", "#ff6b6b", tasks)],
        )
    }

    fn column(table: &Table, index: usize) -> Vec<String> {
        table
            .row_iter()
            .filter_map(|row| row.cell_iter().nth(index))
            .map(Cell::content)
            .collect()
    }

    #[test]
    fn empty_groups_are_marked() {
        let table = board_table(&board());
        assert_eq!(column(&table, 0), ["Tasks", "Later", "TOTAL"]);
        assert_eq!(column(&table, 3), ["Task 1", "(empty)", "2 groups"]);
        assert_eq!(column(&table, 2), ["1", "0", "1"]);
    }

    #[test]
    fn stats_round_the_average() {
        let board = board();
        let stats = ItemQueries::new(&board.items).stats();
        let table = stats_table(&stats);
        assert_eq!(column(&table, 1), ["1", "1", "1", "1.0", "1", "1"]);
        let counts = group_counts_table(&stats).expect("one populated group");
        assert_eq!(column(&counts, 0), ["tasks"]);
    }

    #[test]
    fn empty_board_has_no_count_table() {
        let stats = ItemQueries::new(&[]).stats();
        assert!(group_counts_table(&stats).is_none());
        assert_eq!(column(&stats_table(&stats), 1)[3], "0.0");
    }

    #[test]
    fn clean_report_has_no_failure_table() {
        let report = ReplayReport::default();
        assert!(failure_table(&report).is_none());
        assert_eq!(
            replay_summary_line(&report),
            "Applied 0 messages: 0 changed, 0 unchanged, 0 failed"
        );
    }
}
