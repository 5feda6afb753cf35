//! Plain reorderable list, the ungrouped board.

use cardgroup_model::Item;

/// Anything with a stable string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Item {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Remove the element at `from` and reinsert it at `to`.
///
/// `to` is interpreted after the removal and clamped to the end. Returns
/// false, leaving the vector untouched, when `from` is out of range.
pub fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let moved = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, moved);
    true
}

/// An ordered list of cards that can be dragged into a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortableList<T> {
    items: Vec<T>,
}

impl<T> Default for SortableList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> SortableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    /// Returns false when `drag_index` is out of range.
    pub fn move_item(&mut self, drag_index: usize, hover_index: usize) -> bool {
        splice_move(&mut self.items, drag_index, hover_index)
    }

    pub fn add_item(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, key: &str) -> Option<T> {
        let index = self.position(key)?;
        Some(self.items.remove(index))
    }

    /// Apply `update` to the item with `key`; returns false if absent.
    pub fn update_item(&mut self, key: &str, update: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.key() == key) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }
}
