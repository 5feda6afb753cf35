use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info, info_span};

use cardgroup_cli::replay::{ReplayReport, parse_script, replay};
use cardgroup_engine::{
    BoardMessage, EngineConfig, FixedHues, GroupManager, HueSource, IdGenerator, ItemFilter,
    ItemQueries, ItemStats, SequentialIds,
};
use cardgroup_model::{Board, Group, GroupId, GroupedSeed, ItemId, SeedItem};

use crate::cli::{ReplayArgs, StatsArgs};

/// Hue used for every generated color in deterministic mode.
const DETERMINISTIC_HUE: u16 = 210;

pub struct DemoResult {
    pub board: Board,
    /// Texts of "Task" items sharing a group with at least one other item.
    pub grouped_tasks: Vec<String>,
}

pub struct ReplayResult {
    pub board: Board,
    pub report: ReplayReport,
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load_from(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

pub fn run_demo(config: EngineConfig) -> Result<DemoResult> {
    let mut manager = GroupManager::new().with_config(config);
    manager
        .replace_board(demo_seed()?.into_board())
        .context("load demo board")?;
    let filter = ItemFilter {
        text_search: Some("Task".to_string()),
        min_items_in_group: Some(2),
        ..ItemFilter::default()
    };
    let grouped_tasks = manager
        .queries()
        .filtered(&filter)
        .into_iter()
        .map(|item| item.text.clone())
        .collect();
    Ok(DemoResult {
        board: manager.board(),
        grouped_tasks,
    })
}

pub fn run_replay(args: &ReplayArgs, config: EngineConfig) -> Result<ReplayResult> {
    let span = info_span!("replay", script = %args.script.display());
    let _guard = span.enter();

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("read script {}", args.script.display()))?;
    let messages = parse_script(&script)
        .with_context(|| format!("parse script {}", args.script.display()))?;
    let initial = initial_board(args)?;
    info!(messages = messages.len(), "loaded script");

    let result = if args.deterministic {
        let manager = GroupManager::with_generators(
            SequentialIds::default(),
            FixedHues::new(vec![DETERMINISTIC_HUE]),
        );
        replay_on(manager.with_config(config), initial, messages)?
    } else {
        replay_on(GroupManager::new().with_config(config), initial, messages)?
    };

    if let Some(output) = &args.output {
        let json = serde_json::to_string_pretty(&result.board).context("serialize board")?;
        fs::write(output, json).with_context(|| format!("write board {}", output.display()))?;
        info!(path = %output.display(), "wrote board");
    }
    Ok(result)
}

pub fn run_stats(args: &StatsArgs) -> Result<ItemStats> {
    let board: Board = read_json(&args.board)?;
    let board = board
        .normalized()
        .with_context(|| format!("validate board {}", args.board.display()))?;
    debug!(items = board.items.len(), groups = board.groups.len(), "loaded board");
    Ok(ItemQueries::new(&board.items).stats())
}

fn replay_on<I: IdGenerator, H: HueSource>(
    mut manager: GroupManager<I, H>,
    initial: Option<Board>,
    messages: Vec<BoardMessage>,
) -> Result<ReplayResult> {
    if let Some(board) = initial {
        manager
            .replace_board(board)
            .context("load starting board")?;
    }
    let report = replay(&mut manager, messages);
    Ok(ReplayResult {
        board: manager.board(),
        report,
    })
}

fn initial_board(args: &ReplayArgs) -> Result<Option<Board>> {
    if let Some(path) = &args.board {
        return read_json::<Board>(path).map(Some);
    }
    if let Some(path) = &args.seed {
        return read_json::<GroupedSeed>(path).map(|seed| Some(seed.into_board()));
    }
    Ok(None)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

/// The two-column board the grouping widget ships with.
fn demo_seed() -> Result<GroupedSeed> {
    let mut group_items = BTreeMap::new();
    let mut groups = Vec::new();
    for (id, title, background, items) in [
        (
            "tasks",
            "Tasks",
            "#e3f2fd",
            [("1", "Task 1", "#ff6b6b"), ("2", "Task 2", "#4ecdc4")],
        ),
        (
            "ideas",
            "Ideas",
            "#f3e5f5",
            [("3", "Idea 1", "#feca57"), ("4", "Idea 2", "#ff9ff3")],
        ),
    ] {
        let group_id = GroupId::new(id)?;
        let seeds = items
            .into_iter()
            .map(|(item, text, color)| Ok(SeedItem::new(ItemId::new(item)?, text, color)))
            .collect::<Result<Vec<_>>>()?;
        group_items.insert(group_id.clone(), seeds);
        groups.push(Group::new(group_id, title, background));
    }
    Ok(GroupedSeed {
        groups,
        group_items,
    })
}
