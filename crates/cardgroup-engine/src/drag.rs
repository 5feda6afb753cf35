//! Drag gesture handling.
//!
//! Pointer layers fire hover events continuously while a card is dragged, so
//! the same transfer may be requested many times in a row. A [`DragSession`]
//! tracks where the dragged card currently is and forwards only the hovers
//! that actually move it. The session is consumed when the gesture ends.

use cardgroup_model::{GroupId, ItemId};
use tracing::trace;

use crate::error::Result;
use crate::generator::{HueSource, IdGenerator};
use crate::manager::{GroupManager, Reorder, Transfer};

/// Memo of the last applied (item, target) transfer.
///
/// A session never transfers a card into the group it already occupies, so
/// the memo does not gate board changes. It tells a repeated hover of the
/// transfer just made ([`HoverOutcome::Repeated`]) apart from hovering the
/// card's own group ([`HoverOutcome::SameTarget`]). Any other change to the
/// card's position clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverGuard {
    last: Option<(ItemId, GroupId)>,
}

impl HoverGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// False when this exact transfer was the last one recorded.
    pub fn should_apply(&self, item: &ItemId, target: &GroupId) -> bool {
        !matches!(&self.last, Some((last_item, last_target)) if last_item == item && last_target == target)
    }

    pub fn record(&mut self, item: &ItemId, target: &GroupId) {
        self.last = Some((item.clone(), target.clone()));
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<(&ItemId, &GroupId)> {
        self.last.as_ref().map(|(item, group)| (item, group))
    }
}

/// Vertical extent of the hovered card and the pointer position, in the same
/// coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverGeometry {
    pub top: f64,
    pub bottom: f64,
    pub pointer_y: f64,
}

impl HoverGeometry {
    pub fn midpoint(&self) -> f64 {
        self.top + (self.bottom - self.top) / 2.0
    }

    /// Whether moving a card from `from` to `to` has crossed the hovered
    /// card's middle.
    ///
    /// Moving down needs the pointer at or below the middle, moving up needs
    /// it at or above.
    pub fn allows(&self, from: usize, to: usize) -> bool {
        let middle = self.midpoint();
        match from.cmp(&to) {
            std::cmp::Ordering::Less => self.pointer_y >= middle,
            std::cmp::Ordering::Greater => self.pointer_y <= middle,
            std::cmp::Ordering::Equal => false,
        }
    }
}

/// Result of a single hover event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverOutcome {
    /// Reordered within the current group.
    Moved { from: usize, to: usize },
    /// Moved into another group.
    Transferred {
        from: GroupId,
        to: GroupId,
        pruned: Vec<GroupId>,
    },
    /// The card is already at the hovered position.
    SamePosition,
    /// Hovered the group the card already belongs to.
    SameTarget,
    /// The pointer has not crossed the hovered card's middle yet.
    BeforeMidpoint,
    /// The same transfer was just applied.
    Repeated,
}

impl HoverOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Moved { .. } | Self::Transferred { .. })
    }
}

/// One drag gesture, from pick-up to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    item: ItemId,
    group: GroupId,
    index: usize,
    guard: HoverGuard,
}

impl DragSession {
    /// Pick up `item`.
    pub fn start<I: IdGenerator, H: HueSource>(
        manager: &GroupManager<I, H>,
        item: &ItemId,
    ) -> Result<Self> {
        let (group, index) = manager.locate(item)?;
        trace!(item = %item, group = %group, index, "drag started");
        Ok(Self {
            item: item.clone(),
            group,
            index,
            guard: HoverGuard::new(),
        })
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }

    pub fn group(&self) -> &GroupId {
        &self.group
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn guard(&self) -> &HoverGuard {
        &self.guard
    }

    /// Hover another card of the current group at `hover_index`.
    pub fn hover_card<I: IdGenerator, H: HueSource>(
        &mut self,
        manager: &mut GroupManager<I, H>,
        hover_index: usize,
        geometry: Option<HoverGeometry>,
    ) -> Result<HoverOutcome> {
        self.sync(manager)?;
        let last = manager.items_in(self.group.as_str()).len().saturating_sub(1);
        let to = hover_index.min(last);
        if to == self.index {
            return Ok(HoverOutcome::SamePosition);
        }
        if let Some(geometry) = geometry
            && !geometry.allows(self.index, to)
        {
            return Ok(HoverOutcome::BeforeMidpoint);
        }

        match manager.move_item_in_group(&self.group, self.index, to)? {
            Reorder::Unchanged => Ok(HoverOutcome::SamePosition),
            Reorder::Moved { from, to } => {
                self.index = to;
                self.guard.clear();
                Ok(HoverOutcome::Moved { from, to })
            }
        }
    }

    /// Hover the body of `target`.
    pub fn hover_group<I: IdGenerator, H: HueSource>(
        &mut self,
        manager: &mut GroupManager<I, H>,
        target: &GroupId,
    ) -> Result<HoverOutcome> {
        self.sync(manager)?;
        if !self.guard.should_apply(&self.item, target) {
            return Ok(HoverOutcome::Repeated);
        }
        if *target == self.group {
            return Ok(HoverOutcome::SameTarget);
        }

        match manager.transfer_item(&self.item, target)? {
            Transfer::Unchanged => Ok(HoverOutcome::SameTarget),
            Transfer::Moved { from, pruned } => {
                let (group, index) = manager.locate(&self.item)?;
                self.group = group;
                self.index = index;
                self.guard.record(&self.item, target);
                Ok(HoverOutcome::Transferred {
                    from,
                    to: target.clone(),
                    pruned,
                })
            }
        }
    }

    /// Drop onto a group; hovers already placed the card.
    pub fn drop_on_group(self) -> GroupId {
        trace!(item = %self.item, group = %self.group, "dropped on group");
        self.group
    }

    /// Drop onto empty canvas, giving the card a group of its own.
    pub fn drop_on_canvas<I: IdGenerator, H: HueSource>(
        self,
        manager: &mut GroupManager<I, H>,
    ) -> Result<GroupId> {
        trace!(item = %self.item, "dropped on canvas");
        manager.create_single_item_group(&self.item)
    }

    pub fn cancel(self) {
        trace!(item = %self.item, "drag cancelled");
    }

    /// Pick up changes made to the board outside this session.
    fn sync<I: IdGenerator, H: HueSource>(&mut self, manager: &GroupManager<I, H>) -> Result<()> {
        let (group, index) = manager.locate(&self.item)?;
        if group != self.group || index != self.index {
            trace!(item = %self.item, group = %group, index, "drag position refreshed");
            self.group = group;
            self.index = index;
            self.guard.clear();
        }
        Ok(())
    }
}
