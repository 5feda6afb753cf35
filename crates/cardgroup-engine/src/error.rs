//! Error types for board operations and engine configuration.

use std::path::PathBuf;

use cardgroup_model::{GroupId, ItemId, ModelError};
use thiserror::Error;

/// Failure of a single board operation.
///
/// Every variant leaves the board exactly as it was before the call, so
/// callers may log and carry on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("item not found: {item}")]
    ItemNotFound { item: ItemId },

    #[error("group not found: {group}")]
    GroupNotFound { group: GroupId },

    #[error("index {index} out of range for group {group} ({len} items)")]
    IndexOutOfRange {
        group: GroupId,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure to load an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
