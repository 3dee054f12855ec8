//! Game configuration loader.

use std::path::Path;

use isle_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a `GameConfig` from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.viewport_width == 0 || config.viewport_height == 0 {
            anyhow::bail!(
                "Viewport must not be empty, got {}x{}",
                config.viewport_width,
                config.viewport_height
            );
        }
        Ok(config)
    }
}
