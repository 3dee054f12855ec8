//! Data-driven content and the oracles built from it.
//!
//! This crate turns content files into the oracle traits `isle-core` consumes:
//! - Map catalog (TOML) with mask/texture images
//! - Quest command scripts (RON), optionally paired with a dialog text file
//! - Unit templates (RON)
//! - Game configuration (TOML)
//!
//! The in-memory catalogs in [`catalog`] are always available; the file
//! loaders sit behind the `loaders` feature.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{MapCatalog, QuestBook, UnitCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, DialogLoader, MapLoader, QuestLoader, QuestScript,
    UnitLoader,
};
