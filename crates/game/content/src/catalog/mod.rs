//! In-memory oracle implementations.
//!
//! Loaders fill these catalogs from files; tests and tools can fill them directly.

mod maps;
mod quests;
mod units;

pub use maps::MapCatalog;
pub use quests::QuestBook;
pub use units::UnitCatalog;
