//! Data model for the card grouping engine.

pub mod board;
pub mod color;
pub mod error;
pub mod ids;
pub mod item;

pub use board::{Board, GroupedSeed, SeedItem};
pub use color::Hsl;
pub use error::{ModelError, Result};
pub use ids::{GroupId, ItemId};
pub use item::{Group, Item, ItemUpdate};
