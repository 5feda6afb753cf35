//! Derived state - group membership computed from the flat item list.
//!
//! Nothing here is a source of truth. [`DerivedState::from_items`] is run by
//! the engine after every mutation of its item list, and the result is thrown
//! away on the next one.

use std::collections::HashMap;

use cardgroup_model::{GroupId, Item};

/// Per-group positions into the engine's item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedState {
    slots: HashMap<GroupId, Vec<usize>>,
}

impl DerivedState {
    /// Single pass over `items`, keeping their relative order within each group.
    pub fn from_items(items: &[Item]) -> Self {
        let mut slots: HashMap<GroupId, Vec<usize>> = HashMap::new();
        for (index, item) in items.iter().enumerate() {
            if let Some(positions) = slots.get_mut(&item.group_id) {
                positions.push(index);
            } else {
                slots.insert(item.group_id.clone(), vec![index]);
            }
        }
        Self { slots }
    }

    /// Positions of a group's members in the item list, in display order.
    pub fn slots(&self, group: &str) -> &[usize] {
        self.slots.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if at least one item references `group`.
    pub fn is_active(&self, group: &str) -> bool {
        self.slots.contains_key(group)
    }

    pub fn active_group_ids(&self) -> impl Iterator<Item = &GroupId> {
        self.slots.keys()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }
}
