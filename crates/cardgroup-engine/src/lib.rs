//! Group/item state engine for drag-and-drop card boards.
//!
//! # Module Organization
//!
//! - [`manager`]: [`GroupManager`], the board state and its operations
//! - [`derived`]: group membership computed from the flat item list
//! - [`message`]: operations as serializable [`BoardMessage`]s
//! - [`drag`]: drag gesture sessions and the hover re-entrancy guard
//! - [`sortable`]: a plain reorderable list
//! - [`queries`]: filtering and statistics over items
//! - [`generator`]: pluggable id and hue sources
//! - [`config`]: palette and label settings

pub mod config;
pub mod derived;
pub mod drag;
pub mod error;
pub mod generator;
pub mod manager;
pub mod message;
pub mod queries;
pub mod sortable;

pub use config::{EngineConfig, LabelConfig, PaletteConfig};
pub use derived::DerivedState;
pub use drag::{DragSession, HoverGeometry, HoverGuard, HoverOutcome};
pub use error::{ConfigError, EngineError, Result};
pub use generator::{FixedHues, HueSource, IdGenerator, RandomHues, RandomIds, SequentialIds};
pub use manager::{CreatedItem, GroupItems, GroupManager, Reorder, Transfer};
pub use message::{Applied, BoardMessage};
pub use queries::{ItemFilter, ItemQueries, ItemStats, SortKey};
pub use sortable::{Keyed, SortableList, splice_move};
