//! Integration tests for script replay and the printed tables.

use cardgroup_cli::replay::{parse_script, replay};
use cardgroup_cli::summary::{board_table, failure_table, replay_summary_line};
use cardgroup_engine::{EngineError, FixedHues, GroupManager, SequentialIds};
use cardgroup_model::GroupedSeed;
use comfy_table::Table;

const SEED: &str = r##"{
    "groups": [
        { "id": "tasks", "title": "Tasks", "backgroundColor": "#e3f2fd" },
        { "id": "ideas", "title": "Ideas", "backgroundColor": "#f3e5f5" }
    ],
    "groupItems": {
        "tasks": [
            { "id": "1", "text": "Task 1", "color": "#ff6b6b" },
            { "id": "2", "text": "Task 2", "color": "#4ecdc4" }
        ],
        "ideas": [
            { "id": "3", "text": "Idea 1", "color": "#feca57" },
            { "id": "4", "text": "Idea 2", "color": "#ff9ff3" }
        ]
    }
}"##;

const SCRIPT: &str = r#"[
    { "op": "move_item_in_group", "group": "tasks", "drag_index": 0, "hover_index": 1 },
    { "op": "transfer_item", "item": "3", "target": "tasks" },
    { "op": "create_new_item" },
    { "op": "create_single_item_group", "item": "4" },
    { "op": "remove_item", "item": "ghost" },
    { "op": "create_group" }
]"#;

fn seeded_manager() -> GroupManager<SequentialIds, FixedHues> {
    let seed: GroupedSeed = serde_json::from_str(SEED).expect("seed json");
    let mut manager =
        GroupManager::with_generators(SequentialIds::default(), FixedHues::new(vec![210]));
    manager.replace_board(seed.into_board()).expect("seed loads");
    manager
}

/// Cell contents of every body row, one line per row.
fn rows(table: &Table) -> String {
    table
        .row_iter()
        .map(|row| {
            row.cell_iter()
                .map(comfy_table::Cell::content)
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn replay_renders_resulting_board() {
    let mut manager = seeded_manager();
    let messages = parse_script(SCRIPT).expect("script json");

    let report = replay(&mut manager, messages);

    let table = board_table(&manager.board());
    insta::assert_snapshot!(rows(&table), @r"
Tasks | tasks | 3 | Task 2, Task 1, Idea 1
Item 5 | id-1 | 1 | Item 5
Idea 2 | id-3 | 1 | Idea 2
Group 4 | id-4 | 0 | (empty)
TOTAL | - | 5 | 4 groups
");
    assert_eq!(report.total(), 6);
    assert_eq!(report.changed, 5);
    assert_eq!(report.unchanged, 0);
}

#[test]
fn failed_messages_are_reported_and_skipped() {
    let mut manager = seeded_manager();
    let messages = parse_script(SCRIPT).expect("script json");

    let report = replay(&mut manager, messages);

    assert!(report.has_failures());
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.index, 4);
    assert_eq!(failure.op, "remove_item");
    assert!(matches!(failure.error, EngineError::ItemNotFound { .. }));
    assert_eq!(manager.items().len(), 5);

    let table = failure_table(&report).expect("one failure");
    assert_eq!(rows(&table), "4 | remove_item | item not found: ghost");
    assert_eq!(
        replay_summary_line(&report),
        "Applied 6 messages: 5 changed, 0 unchanged, 1 failed"
    );
}

#[test]
fn printed_board_keeps_member_order() {
    let mut manager = seeded_manager();
    replay(&mut manager, parse_script(SCRIPT).expect("script json"));

    let mut table = board_table(&manager.board());
    let printed = table.force_no_tty().to_string();

    assert!(printed.contains("Task 2, Task 1, Idea 1"));
    assert!(printed.contains("(empty)"));
    assert!(!printed.contains('\u{1b}'));
}

#[test]
fn repeated_transfer_counts_as_unchanged() {
    let mut manager = seeded_manager();
    let messages = parse_script(
        r#"[
            { "op": "transfer_item", "item": "1", "target": "ideas" },
            { "op": "transfer_item", "item": "1", "target": "ideas" },
            { "op": "update_item", "item": "1" }
        ]"#,
    )
    .expect("script json");

    let report = replay(&mut manager, messages);

    assert_eq!(report.changed, 1);
    assert_eq!(report.unchanged, 2);
    assert!(!report.has_failures());
}

#[test]
fn unknown_operations_fail_to_parse() {
    assert!(parse_script(r#"[{ "op": "explode" }]"#).is_err());
    assert!(parse_script(r#"{ "op": "create_group" }"#).is_err());
}
