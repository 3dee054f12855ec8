//! Content loaders for reading game data from files.
//!
//! Each loader converts one file format into core types or into one of the
//! in-memory catalogs of [`crate::catalog`].

pub mod config;
pub mod dialog;
pub mod factory;
pub mod map;
pub mod quest;
pub mod units;

pub use config::ConfigLoader;
pub use dialog::DialogLoader;
pub use factory::{Content, ContentFactory};
pub use map::MapLoader;
pub use quest::{QuestLoader, QuestScript};
pub use units::UnitLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
