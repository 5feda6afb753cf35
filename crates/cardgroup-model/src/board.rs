//! Board snapshots and seeds.
//!
//! A [`Board`] is the single-array shape: every item carries its own group id.
//! A [`GroupedSeed`] is the per-group shape the first prototypes were seeded
//! with; [`GroupedSeed::into_board`] flattens it.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Group, GroupId, Item, ItemId, ModelError, Result};

/// Owned snapshot of an engine's items and groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Board {
    pub fn new(groups: Vec<Group>, items: Vec<Item>) -> Self {
        Self { groups, items }
    }

    /// Reject duplicate ids and declare placeholder groups for items whose
    /// group is missing.
    pub fn normalized(mut self) -> Result<Self> {
        let mut group_ids: HashSet<GroupId> = HashSet::with_capacity(self.groups.len());
        for group in &self.groups {
            if !group_ids.insert(group.id.clone()) {
                return Err(ModelError::DuplicateGroup(group.id.clone()));
            }
        }
        let mut item_ids: HashSet<&ItemId> = HashSet::with_capacity(self.items.len());
        let mut missing = Vec::new();
        for item in &self.items {
            if !item_ids.insert(&item.id) {
                return Err(ModelError::DuplicateItem(item.id.clone()));
            }
            if group_ids.insert(item.group_id.clone()) {
                missing.push(item.group_id.clone());
            }
        }
        self.groups.extend(missing.into_iter().map(Group::placeholder));
        Ok(self)
    }
}

/// An item as it appears inside a [`GroupedSeed`], without a group id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedItem {
    pub id: ItemId,
    pub text: String,
    pub color: String,
}

impl SeedItem {
    pub fn new(id: ItemId, text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            color: color.into(),
        }
    }

    pub fn into_item(self, group_id: GroupId) -> Item {
        Item {
            id: self.id,
            text: self.text,
            color: self.color,
            group_id,
        }
    }
}

/// Initial data in per-group form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedSeed {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub group_items: BTreeMap<GroupId, Vec<SeedItem>>,
}

impl GroupedSeed {
    /// Flatten in group order; entries for undeclared groups follow in key order.
    pub fn into_board(mut self) -> Board {
        let mut items = Vec::new();
        for group in &self.groups {
            if let Some(members) = self.group_items.remove(&group.id) {
                items.extend(members.into_iter().map(|m| m.into_item(group.id.clone())));
            }
        }
        for (group_id, members) in self.group_items {
            items.extend(members.into_iter().map(|m| m.into_item(group_id.clone())));
        }
        Board {
            groups: self.groups,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gid(s: &str) -> GroupId {
        GroupId::new(s).unwrap()
    }

    fn iid(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    #[test]
    fn normalized_adds_placeholder_group() {
        let board = Board::new(
            vec![],
            vec![Item::new(iid("1"), "Loose", "#fff", gid("lost"))],
        );
        let board = board.normalized().unwrap();
        assert_eq!(board.groups.len(), 1);
        assert_eq!(board.groups[0].id, gid("lost"));
        assert_eq!(board.groups[0].title, "lost");
    }

    #[test]
    fn normalized_rejects_duplicate_items() {
        let board = Board::new(
            vec![Group::new(gid("g"), "G", "#fff")],
            vec![
                Item::new(iid("1"), "A", "#fff", gid("g")),
                Item::new(iid("1"), "B", "#fff", gid("g")),
            ],
        );
        assert_eq!(
            board.normalized(),
            Err(ModelError::DuplicateItem(iid("1")))
        );
    }
}
