//! Read-only queries over the flat item list.
//!
//! Everything here is computed from the items alone, so the same queries work
//! on a live [`GroupManager`](crate::GroupManager) and on a loaded snapshot.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use cardgroup_model::{GroupId, Item};
use serde::Serialize;

/// Field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Text,
    Color,
    GroupId,
}

/// Combined filter; `None` fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub group_ids: Option<Vec<GroupId>>,
    pub colors: Option<Vec<String>>,
    /// Case-insensitive substring of the item text.
    pub text_search: Option<String>,
    /// Minimum size of the item's group.
    pub min_items_in_group: Option<usize>,
    /// Maximum size of the item's group.
    pub max_items_in_group: Option<usize>,
}

/// Aggregate counts over a set of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStats {
    pub total_items: usize,
    pub unique_groups: usize,
    pub unique_colors: usize,
    /// 0.0 when there are no items.
    pub avg_items_per_group: f64,
    pub max_items_in_group: usize,
    /// Smallest non-empty group; 0 when there are no items.
    pub min_items_in_group: usize,
    pub group_counts: BTreeMap<GroupId, usize>,
}

/// Query view over a slice of items.
#[derive(Debug, Clone, Copy)]
pub struct ItemQueries<'a> {
    items: &'a [Item],
}

impl<'a> ItemQueries<'a> {
    pub fn new(items: &'a [Item]) -> Self {
        Self { items }
    }

    pub fn by_group(&self, group: &str) -> Vec<&'a Item> {
        self.matching(|item| item.group_id.as_str() == group)
    }

    pub fn by_color(&self, color: &str) -> Vec<&'a Item> {
        self.matching(|item| item.color == color)
    }

    pub fn by_text(&self, search: &str) -> Vec<&'a Item> {
        let needle = search.to_lowercase();
        self.matching(|item| item.text.to_lowercase().contains(&needle))
    }

    pub fn by_groups(&self, groups: &[GroupId]) -> Vec<&'a Item> {
        self.matching(|item| groups.contains(&item.group_id))
    }

    /// Items that are alone in their group.
    pub fn in_single_item_groups(&self) -> Vec<&'a Item> {
        let counts = self.group_counts();
        self.matching(|item| counts.get(&item.group_id) == Some(&1))
    }

    /// Items that share their group with at least one other item.
    pub fn in_multi_item_groups(&self) -> Vec<&'a Item> {
        let counts = self.group_counts();
        self.matching(|item| counts.get(&item.group_id).is_some_and(|&n| n > 1))
    }

    pub fn group_counts(&self) -> BTreeMap<GroupId, usize> {
        let mut counts = BTreeMap::new();
        for item in self.items {
            *counts.entry(item.group_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn stats(&self) -> ItemStats {
        let group_counts = self.group_counts();
        let total_items = self.items.len();
        let unique_groups = group_counts.len();
        let unique_colors = self
            .items
            .iter()
            .map(|item| item.color.as_str())
            .collect::<HashSet<_>>()
            .len();
        let avg_items_per_group = if unique_groups == 0 {
            0.0
        } else {
            total_items as f64 / unique_groups as f64
        };
        ItemStats {
            total_items,
            unique_groups,
            unique_colors,
            avg_items_per_group,
            max_items_in_group: group_counts.values().copied().max().unwrap_or(0),
            min_items_in_group: group_counts.values().copied().min().unwrap_or(0),
            group_counts,
        }
    }

    /// Stable sort by `key`.
    pub fn sorted(&self, key: SortKey, ascending: bool) -> Vec<&'a Item> {
        let mut sorted: Vec<&'a Item> = self.items.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = compare(a, b, key);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        sorted
    }

    pub fn filtered(&self, filter: &ItemFilter) -> Vec<&'a Item> {
        let needle = filter.text_search.as_deref().map(str::to_lowercase);
        let counts = if filter.min_items_in_group.is_some() || filter.max_items_in_group.is_some() {
            Some(self.group_counts())
        } else {
            None
        };
        self.matching(|item| {
            if let Some(groups) = &filter.group_ids
                && !groups.contains(&item.group_id)
            {
                return false;
            }
            if let Some(colors) = &filter.colors
                && !colors.contains(&item.color)
            {
                return false;
            }
            if let Some(needle) = &needle
                && !item.text.to_lowercase().contains(needle.as_str())
            {
                return false;
            }
            if let Some(counts) = &counts {
                let count = counts.get(&item.group_id).copied().unwrap_or(0);
                if filter.min_items_in_group.is_some_and(|min| count < min) {
                    return false;
                }
                if filter.max_items_in_group.is_some_and(|max| count > max) {
                    return false;
                }
            }
            true
        })
    }

    fn matching(&self, predicate: impl Fn(&Item) -> bool) -> Vec<&'a Item> {
        self.items.iter().filter(|item| predicate(item)).collect()
    }
}

fn compare(a: &Item, b: &Item, key: SortKey) -> Ordering {
    match key {
        SortKey::Text => a.text.cmp(&b.text),
        SortKey::Color => a.color.cmp(&b.color),
        SortKey::GroupId => a.group_id.cmp(&b.group_id),
    }
}
