//! Content factory for building oracles from a data directory.

use std::path::{Path, PathBuf};

use isle_core::GameConfig;

use crate::catalog::{MapCatalog, QuestBook, UnitCatalog};
use crate::loaders::{ConfigLoader, LoadResult, MapLoader, QuestLoader, UnitLoader};

/// Everything a session needs from the data directory.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub maps: MapCatalog,
    pub quests: QuestBook,
    pub units: UnitCatalog,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── units.ron          (optional)
/// ├── maps/
/// │   ├── catalog.toml
/// │   └── *.png | *.bmp
/// ├── quests/
/// │   └── {MAP}_{quest}[_{zone}[_{interior}]].ron
/// └── texts/
///     └── *.txt
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load `config.toml`, or the defaults when the file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the map catalog from `maps/catalog.toml`.
    pub fn load_maps(&self) -> LoadResult<MapCatalog> {
        MapLoader::load(&self.data_dir.join("maps").join("catalog.toml"))
    }

    /// Load unit templates from `units.ron`; an absent file yields an empty catalog.
    pub fn load_units(&self) -> LoadResult<UnitCatalog> {
        let path = self.data_dir.join("units.ron");
        if !path.exists() {
            return Ok(UnitCatalog::new());
        }
        UnitLoader::load(&path)
    }

    /// Load every quest script from `quests/`, with dialogs from `texts/`.
    pub fn load_quests(&self) -> LoadResult<QuestBook> {
        QuestLoader::load_dir(&self.data_dir.join("quests"), &self.data_dir.join("texts"))
    }

    pub fn load_all(&self) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            maps: self.load_maps()?,
            quests: self.load_quests()?,
            units: self.load_units()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
