use crate::map::MapBlueprint;

use super::OracleError;

/// Source of map images, keyed by map name.
pub trait MapOracle: Send + Sync {
    /// Returns the blueprint registered under `name`.
    fn blueprint(&self, name: &str) -> Result<MapBlueprint, OracleError>;

    /// Map loaded by a fresh game.
    fn start_map(&self) -> Option<String> {
        None
    }
}
