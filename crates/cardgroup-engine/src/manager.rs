//! The group/item state engine.
//!
//! [`GroupManager`] owns one flat list of items, each tagged with a group id,
//! plus the list of group descriptors. Group membership is never stored on
//! its own: it is derived from the item list after every mutation, and groups
//! left without items are pruned in the same step.
//!
//! # Pruning
//!
//! A group with no items is removed when membership is recomputed, unless it
//! is *pending*: created through [`GroupManager::create_group`] (or loaded
//! empty) and never populated since. The first item that lands in a pending
//! group makes it an ordinary group.

use std::collections::{BTreeMap, HashSet};

use cardgroup_model::{Board, Group, GroupId, GroupedSeed, Item, ItemId, ItemUpdate};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::derived::DerivedState;
use crate::error::{EngineError, Result};
use crate::generator::{HueSource, IdGenerator, RandomHues, RandomIds};
use crate::queries::ItemQueries;
use crate::sortable::splice_move;

/// Attempts at drawing a fresh id before the engine starts suffixing.
const MAX_ID_ATTEMPTS: u32 = 16;

/// Group id to ordered members, as seen by the presentation layer.
pub type GroupItems<'a> = BTreeMap<&'a GroupId, Vec<&'a Item>>;

/// Ids produced by [`GroupManager::create_new_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    pub item: ItemId,
    pub group: GroupId,
}

/// Outcome of a reorder within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    /// The item already sat at the requested position.
    Unchanged,
    Moved { from: usize, to: usize },
}

/// Outcome of a transfer between groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    /// The item already belonged to the target group.
    Unchanged,
    Moved {
        from: GroupId,
        /// Groups removed because the transfer emptied them.
        pruned: Vec<GroupId>,
    },
}

/// The board state engine.
///
/// Generic over its id and hue sources so tests can make boards
/// reproducible; the defaults draw from UUID v4 randomness.
#[derive(Debug, Clone)]
pub struct GroupManager<I = RandomIds, H = RandomHues> {
    items: Vec<Item>,
    groups: Vec<Group>,
    pending: HashSet<GroupId>,
    derived: DerivedState,
    issued: HashSet<String>,
    ids: I,
    hues: H,
    config: EngineConfig,
    serial: u64,
}

impl GroupManager {
    pub fn new() -> Self {
        Self::with_generators(RandomIds, RandomHues)
    }

    /// Start from a snapshot.
    pub fn from_board(board: Board) -> Result<Self> {
        let mut manager = Self::new();
        manager.replace_board(board)?;
        Ok(manager)
    }

    /// Start from per-group seed data.
    pub fn from_seed(seed: GroupedSeed) -> Result<Self> {
        Self::from_board(seed.into_board())
    }
}

impl Default for GroupManager {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdGenerator, H: HueSource> GroupManager<I, H> {
    pub fn with_generators(ids: I, hues: H) -> Self {
        Self {
            items: Vec::new(),
            groups: Vec::new(),
            pending: HashSet::new(),
            derived: DerivedState::default(),
            issued: HashSet::new(),
            ids,
            hues,
            config: EngineConfig::default(),
            serial: 0,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the whole board.
    ///
    /// Groups in `board` that hold no items are treated as pending. On error
    /// the current board is kept.
    pub fn replace_board(&mut self, board: Board) -> Result<()> {
        let board = board.normalized()?;
        let derived = DerivedState::from_items(&board.items);
        self.pending = board
            .groups
            .iter()
            .filter(|group| !derived.is_active(group.id.as_str()))
            .map(|group| group.id.clone())
            .collect();
        self.issued = board
            .groups
            .iter()
            .map(|group| group.id.to_string())
            .chain(board.items.iter().map(|item| item.id.to_string()))
            .collect();
        self.groups = board.groups;
        self.items = board.items;
        self.derived = derived;
        debug!(
            groups = self.groups.len(),
            items = self.items.len(),
            "loaded board"
        );
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Every item, in backing order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Every group, including pending ones.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Groups that currently hold at least one item, in group order.
    pub fn active_groups(&self) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|group| self.derived.is_active(group.id.as_str()))
            .collect()
    }

    /// Groups created but not yet populated.
    pub fn pending_groups(&self) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|group| self.pending.contains(&group.id))
            .collect()
    }

    pub fn active_group_ids(&self) -> HashSet<&GroupId> {
        self.derived.active_group_ids().collect()
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id.as_str() == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    /// Members of one group in display order; empty for unknown groups.
    pub fn items_in(&self, group: &str) -> Vec<&Item> {
        self.derived
            .slots(group)
            .iter()
            .map(|&slot| &self.items[slot])
            .collect()
    }

    /// Membership of every active group.
    pub fn group_items(&self) -> GroupItems<'_> {
        let mut mapping: GroupItems<'_> = BTreeMap::new();
        for item in &self.items {
            mapping.entry(&item.group_id).or_default().push(item);
        }
        mapping
    }

    /// Index of an item within its group.
    pub fn locate(&self, item: &ItemId) -> Result<(GroupId, usize)> {
        let position = self.position_of(item)?;
        let group = self.items[position].group_id.clone();
        let index = self
            .derived
            .slots(group.as_str())
            .iter()
            .position(|&slot| slot == position)
            .unwrap_or_default();
        Ok((group, index))
    }

    pub fn queries(&self) -> ItemQueries<'_> {
        ItemQueries::new(&self.items)
    }

    /// Owned copy of the current state.
    pub fn board(&self) -> Board {
        Board::new(self.groups.clone(), self.items.clone())
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Append an empty group titled after the current group count.
    pub fn create_group(&mut self) -> GroupId {
        let group = self.new_group(self.config.group_title(self.groups.len() + 1));
        let id = group.id.clone();
        self.pending.insert(id.clone());
        self.groups.push(group);
        debug!(group = %id, "created group");
        id
    }

    /// Create an item together with its own singleton group.
    pub fn create_new_item(&mut self) -> CreatedItem {
        let text = self.config.item_text(self.items.len() + 1);
        let group = self.new_group(text.clone());
        let item = self.new_item(text, group.id.clone());
        let created = CreatedItem {
            item: item.id.clone(),
            group: group.id.clone(),
        };
        self.groups.push(group);
        self.items.push(item);
        self.settle();
        debug!(item = %created.item, group = %created.group, "created item");
        created
    }

    /// Create an item inside an existing group.
    pub fn create_item_in_group(&mut self, group: &GroupId) -> Result<ItemId> {
        self.group_position(group)?;
        let item = self.new_item(self.config.item_text(self.items.len() + 1), group.clone());
        let id = item.id.clone();
        self.items.push(item);
        self.settle();
        debug!(item = %id, group = %group, "created item in group");
        Ok(id)
    }

    /// Give an item a brand-new group of its own, titled after its text.
    pub fn create_single_item_group(&mut self, item: &ItemId) -> Result<GroupId> {
        let position = self.position_of(item)?;
        let group = self.new_group(self.items[position].text.clone());
        let id = group.id.clone();
        let from = std::mem::replace(&mut self.items[position].group_id, id.clone());
        self.groups.push(group);
        let pruned = self.settle();
        debug!(item = %item, from = %from, group = %id, pruned = pruned.len(), "ungrouped item");
        Ok(id)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Splice the member at `drag_index` out of the group and back in at
    /// `hover_index`.
    ///
    /// `hover_index` counts positions after the removal and is clamped to
    /// the end of the group. Items of other groups keep their positions in
    /// the backing list.
    pub fn move_item_in_group(
        &mut self,
        group: &GroupId,
        drag_index: usize,
        hover_index: usize,
    ) -> Result<Reorder> {
        self.group_position(group)?;
        let slots = self.derived.slots(group.as_str()).to_vec();
        if drag_index >= slots.len() {
            return Err(EngineError::IndexOutOfRange {
                group: group.clone(),
                index: drag_index,
                len: slots.len(),
            });
        }
        let to = hover_index.min(slots.len() - 1);
        if to == drag_index {
            return Ok(Reorder::Unchanged);
        }

        let mut order = slots.clone();
        splice_move(&mut order, drag_index, to);
        let reordered: Vec<Item> = order.iter().map(|&slot| self.items[slot].clone()).collect();
        for (slot, item) in slots.into_iter().zip(reordered) {
            self.items[slot] = item;
        }
        self.settle();
        debug!(group = %group, from = drag_index, to, "reordered group");
        Ok(Reorder::Moved {
            from: drag_index,
            to,
        })
    }

    /// Move an item to the end of another group.
    ///
    /// Transferring into the group the item already belongs to changes
    /// nothing, so repeated hover events are harmless.
    pub fn transfer_item(&mut self, item: &ItemId, target: &GroupId) -> Result<Transfer> {
        self.group_position(target)?;
        let position = self.position_of(item)?;
        if self.items[position].group_id == *target {
            trace!(item = %item, group = %target, "transfer into current group ignored");
            return Ok(Transfer::Unchanged);
        }

        let mut moved = self.items.remove(position);
        let from = std::mem::replace(&mut moved.group_id, target.clone());
        self.items.push(moved);
        let pruned = self.settle();
        debug!(item = %item, from = %from, to = %target, "transferred item");
        Ok(Transfer::Moved { from, pruned })
    }

    pub fn update_item(&mut self, item: &ItemId, update: &ItemUpdate) -> Result<bool> {
        let position = self.position_of(item)?;
        let changed = update.apply_to(&mut self.items[position]);
        if changed {
            debug!(item = %item, "updated item");
        }
        Ok(changed)
    }

    pub fn remove_item(&mut self, item: &ItemId) -> Result<Item> {
        let position = self.position_of(item)?;
        let removed = self.items.remove(position);
        self.settle();
        debug!(item = %item, group = %removed.group_id, "removed item");
        Ok(removed)
    }

    /// Remove a group along with every item in it.
    pub fn delete_group(&mut self, group: &GroupId) -> Result<Vec<Item>> {
        let position = self.group_position(group)?;
        self.groups.remove(position);
        self.pending.remove(group);
        let (removed, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.group_id == *group);
        self.items = kept;
        self.settle();
        debug!(group = %group, removed = removed.len(), "deleted group");
        Ok(removed)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Recompute membership and prune groups left empty.
    ///
    /// Returns the ids of pruned groups.
    fn settle(&mut self) -> Vec<GroupId> {
        self.derived = DerivedState::from_items(&self.items);
        let derived = &self.derived;
        self.pending.retain(|id| !derived.is_active(id.as_str()));

        let pending = &self.pending;
        let mut pruned = Vec::new();
        self.groups.retain(|group| {
            let keep = derived.is_active(group.id.as_str()) || pending.contains(&group.id);
            if !keep {
                pruned.push(group.id.clone());
            }
            keep
        });
        trace!(
            items = self.items.len(),
            groups = self.groups.len(),
            active = derived.active_count(),
            "recomputed membership"
        );
        if !pruned.is_empty() {
            debug!(?pruned, "pruned empty groups");
        }
        pruned
    }

    fn position_of(&self, item: &ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|candidate| candidate.id == *item)
            .ok_or_else(|| EngineError::ItemNotFound { item: item.clone() })
    }

    fn group_position(&self, group: &GroupId) -> Result<usize> {
        self.groups
            .iter()
            .position(|candidate| candidate.id == *group)
            .ok_or_else(|| EngineError::GroupNotFound {
                group: group.clone(),
            })
    }

    fn new_group(&mut self, title: String) -> Group {
        let hue = self.hues.next_hue();
        let id = self.fresh_group_id();
        Group::new(id, title, self.config.group_color(hue).to_css())
    }

    fn new_item(&mut self, text: String, group: GroupId) -> Item {
        let hue = self.hues.next_hue();
        let id = self.fresh_item_id();
        Item::new(id, text, self.config.item_color(hue).to_css(), group)
    }

    fn fresh_group_id(&mut self) -> GroupId {
        loop {
            if let Ok(id) = GroupId::new(self.fresh_raw_id()) {
                return id;
            }
        }
    }

    fn fresh_item_id(&mut self) -> ItemId {
        loop {
            if let Ok(id) = ItemId::new(self.fresh_raw_id()) {
                return id;
            }
        }
    }

    /// A non-blank, already-trimmed id that was never issued on this board.
    fn fresh_raw_id(&mut self) -> String {
        let mut raw = self.ids.next_id();
        let mut attempts = 1;
        while !usable_id(&raw) || self.issued.contains(&raw) {
            raw = if attempts < MAX_ID_ATTEMPTS {
                self.ids.next_id()
            } else {
                self.serial += 1;
                format!("{}-{}", raw.trim(), self.serial)
            };
            attempts += 1;
        }
        self.issued.insert(raw.clone());
        raw
    }
}

fn usable_id(raw: &str) -> bool {
    !raw.is_empty() && raw.trim() == raw
}
