use thiserror::Error;

use crate::{GroupId, ItemId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
    #[error("duplicate item id: {0}")]
    DuplicateItem(ItemId),
    #[error("duplicate group id: {0}")]
    DuplicateGroup(GroupId),
}

pub type Result<T> = std::result::Result<T, ModelError>;
