//! Board operations as data.
//!
//! A [`BoardMessage`] names one engine operation with its arguments, so
//! interaction layers and recorded scripts can drive a [`GroupManager`]
//! through a single entry point.

use cardgroup_model::{GroupId, Item, ItemId, ItemUpdate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::generator::{HueSource, IdGenerator};
use crate::manager::{GroupManager, Reorder, Transfer};

/// One board operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BoardMessage {
    CreateGroup,
    CreateNewItem,
    CreateItemInGroup {
        group: GroupId,
    },
    MoveItemInGroup {
        group: GroupId,
        drag_index: usize,
        hover_index: usize,
    },
    TransferItem {
        item: ItemId,
        target: GroupId,
    },
    CreateSingleItemGroup {
        item: ItemId,
    },
    RemoveItem {
        item: ItemId,
    },
    UpdateItem {
        item: ItemId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    DeleteGroup {
        group: GroupId,
    },
}

impl BoardMessage {
    /// Operation name as it appears in the `op` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateGroup => "create_group",
            Self::CreateNewItem => "create_new_item",
            Self::CreateItemInGroup { .. } => "create_item_in_group",
            Self::MoveItemInGroup { .. } => "move_item_in_group",
            Self::TransferItem { .. } => "transfer_item",
            Self::CreateSingleItemGroup { .. } => "create_single_item_group",
            Self::RemoveItem { .. } => "remove_item",
            Self::UpdateItem { .. } => "update_item",
            Self::DeleteGroup { .. } => "delete_group",
        }
    }
}

/// What an applied message did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    GroupCreated(GroupId),
    ItemCreated {
        item: ItemId,
        /// Set when the item came with its own new group.
        group: Option<GroupId>,
    },
    Reordered(Reorder),
    Transferred(Transfer),
    Ungrouped(GroupId),
    ItemRemoved(Item),
    ItemUpdated {
        changed: bool,
    },
    GroupDeleted {
        removed: Vec<Item>,
    },
}

impl Applied {
    /// Whether the board changed.
    pub fn changed(&self) -> bool {
        match self {
            Self::Reordered(reorder) => *reorder != Reorder::Unchanged,
            Self::Transferred(transfer) => *transfer != Transfer::Unchanged,
            Self::ItemUpdated { changed } => *changed,
            _ => true,
        }
    }
}

impl<I: IdGenerator, H: HueSource> GroupManager<I, H> {
    /// Apply one message.
    ///
    /// A failed message leaves the board untouched.
    pub fn apply(&mut self, msg: BoardMessage) -> Result<Applied> {
        let op = msg.name();
        let result = self.dispatch(msg);
        if let Err(error) = &result {
            debug!(op, %error, "message rejected");
        }
        result
    }

    fn dispatch(&mut self, msg: BoardMessage) -> Result<Applied> {
        match msg {
            BoardMessage::CreateGroup => Ok(Applied::GroupCreated(self.create_group())),
            BoardMessage::CreateNewItem => {
                let created = self.create_new_item();
                Ok(Applied::ItemCreated {
                    item: created.item,
                    group: Some(created.group),
                })
            }
            BoardMessage::CreateItemInGroup { group } => {
                let item = self.create_item_in_group(&group)?;
                Ok(Applied::ItemCreated { item, group: None })
            }
            BoardMessage::MoveItemInGroup {
                group,
                drag_index,
                hover_index,
            } => self
                .move_item_in_group(&group, drag_index, hover_index)
                .map(Applied::Reordered),
            BoardMessage::TransferItem { item, target } => self
                .transfer_item(&item, &target)
                .map(Applied::Transferred),
            BoardMessage::CreateSingleItemGroup { item } => self
                .create_single_item_group(&item)
                .map(Applied::Ungrouped),
            BoardMessage::RemoveItem { item } => self.remove_item(&item).map(Applied::ItemRemoved),
            BoardMessage::UpdateItem { item, text, color } => {
                let update = ItemUpdate { text, color };
                let changed = self.update_item(&item, &update)?;
                Ok(Applied::ItemUpdated { changed })
            }
            BoardMessage::DeleteGroup { group } => {
                let removed = self.delete_group(&group)?;
                Ok(Applied::GroupDeleted { removed })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::generator::{FixedHues, SequentialIds};

    #[test]
    fn messages_use_snake_case_op_tag() {
        let msg: BoardMessage =
            serde_json::from_str(r#"{"op":"transfer_item","item":"a","target":"g"}"#).unwrap();
        assert_eq!(msg.name(), "transfer_item");
        assert_eq!(
            msg,
            BoardMessage::TransferItem {
                item: ItemId::new("a").unwrap(),
                target: GroupId::new("g").unwrap(),
            }
        );

        let json = serde_json::to_string(&BoardMessage::CreateGroup).unwrap();
        assert_eq!(json, r#"{"op":"create_group"}"#);
    }

    #[test]
    fn update_fields_are_optional() {
        let msg: BoardMessage =
            serde_json::from_str(r#"{"op":"update_item","item":"a","text":"Renamed"}"#).unwrap();
        assert_eq!(
            msg,
            BoardMessage::UpdateItem {
                item: ItemId::new("a").unwrap(),
                text: Some("Renamed".to_string()),
                color: None,
            }
        );
    }

    #[test]
    fn blank_ids_are_rejected_when_parsing() {
        let parsed = serde_json::from_str::<BoardMessage>(r#"{"op":"remove_item","item":"  "}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn apply_reports_outcomes() {
        let mut m = GroupManager::with_generators(SequentialIds::new("m"), FixedHues::default());
        let Applied::GroupCreated(group) = m.apply(BoardMessage::CreateGroup).unwrap() else {
            panic!("expected a created group");
        };
        let applied = m
            .apply(BoardMessage::CreateItemInGroup {
                group: group.clone(),
            })
            .unwrap();
        let Applied::ItemCreated { item, group: None } = applied else {
            panic!("expected an item in the existing group");
        };

        let same = m
            .apply(BoardMessage::TransferItem {
                item: item.clone(),
                target: group,
            })
            .unwrap();
        assert!(!same.changed());

        let err = m
            .apply(BoardMessage::RemoveItem {
                item: ItemId::new("ghost").unwrap(),
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::ItemNotFound { .. }));
        assert_eq!(m.items().len(), 1);
    }
}
