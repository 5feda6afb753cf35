//! Library components of the `cardgroup` command.

pub mod logging;
pub mod replay;
pub mod summary;
