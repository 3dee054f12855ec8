use std::collections::BTreeMap;

use isle_core::{MapBlueprint, MapOracle, OracleError};

/// Map blueprints keyed by name, plus the map a new game starts on.
#[derive(Clone, Debug, Default)]
pub struct MapCatalog {
    maps: BTreeMap<String, MapBlueprint>,
    start: Option<String>,
}

impl MapCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `blueprint`, replacing any map of the same name.
    pub fn insert(&mut self, blueprint: MapBlueprint) -> Option<MapBlueprint> {
        self.maps.insert(blueprint.name.clone(), blueprint)
    }

    pub fn with_map(mut self, blueprint: MapBlueprint) -> Self {
        self.insert(blueprint);
        self
    }

    pub fn with_start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    pub fn set_start(&mut self, name: Option<String>) {
        self.start = name;
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl MapOracle for MapCatalog {
    fn blueprint(&self, name: &str) -> Result<MapBlueprint, OracleError> {
        self.maps
            .get(name)
            .cloned()
            .ok_or_else(|| OracleError::MapNotFound(name.to_owned()))
    }

    /// The configured start map, or the only map of a single-map catalog.
    fn start_map(&self) -> Option<String> {
        if self.start.is_some() {
            return self.start.clone();
        }
        match self.maps.len() {
            1 => self.maps.keys().next().cloned(),
            _ => None,
        }
    }
}
