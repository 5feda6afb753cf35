use serde::{Deserialize, Serialize};

use crate::color::NEUTRAL_BACKGROUND;
use crate::{GroupId, ItemId};

/// A draggable card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub color: String,
    pub group_id: GroupId,
}

impl Item {
    pub fn new(
        id: ItemId,
        text: impl Into<String>,
        color: impl Into<String>,
        group_id: GroupId,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            color: color.into(),
            group_id,
        }
    }
}

/// A named container that holds zero or more items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub title: String,
    pub background_color: String,
}

impl Group {
    pub fn new(id: GroupId, title: impl Into<String>, background_color: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            background_color: background_color.into(),
        }
    }

    /// Stand-in for a group that items reference but nobody declared.
    pub fn placeholder(id: GroupId) -> Self {
        let title = id.as_str().to_string();
        Self::new(id, title, NEUTRAL_BACKGROUND)
    }
}

/// Partial update of an item's presentation fields.
///
/// Group membership is changed through transfers, never through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ItemUpdate {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            color: None,
        }
    }

    #[must_use]
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            text: None,
            color: Some(color.into()),
        }
    }

    /// Apply to an item; returns true if anything changed.
    pub fn apply_to(&self, item: &mut Item) -> bool {
        let mut changed = false;
        if let Some(text) = &self.text
            && item.text != *text
        {
            item.text.clone_from(text);
            changed = true;
        }
        if let Some(color) = &self.color
            && item.color != *color
        {
            item.color.clone_from(color);
            changed = true;
        }
        changed
    }
}
