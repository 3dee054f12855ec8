//! Loads content once and hands out sessions borrowing it.
use isle_content::{Content, ContentFactory};
use isle_core::{Env, GameSession, PcgRng};
use tracing::info;

use crate::api::Result;
use crate::config::RuntimeConfig;
use crate::repository::FileSnapshotRepository;

/// Content and random source shared by every session of a run.
pub struct GameData {
    content: Content,
    rng: PcgRng,
    game_seed: u64,
    start_map: Option<String>,
}

impl GameData {
    /// Reads everything under `config.content_dir`.
    pub fn load(config: &RuntimeConfig) -> Result<Self> {
        let factory = ContentFactory::new(config.content_dir.clone());
        let content = factory.load_all().map_err(|e| {
            e.context(format!(
                "Failed to load content from {}",
                config.content_dir.display()
            ))
        })?;
        info!(
            dir = %config.content_dir.display(),
            maps = content.maps.len(),
            quests = content.quests.len(),
            units = content.units.len(),
            "content loaded"
        );

        let mut data = Self::from_content(content, config.game_seed);
        data.start_map = config.start_map.clone();
        Ok(data)
    }

    pub fn from_content(content: Content, game_seed: u64) -> Self {
        Self {
            content,
            rng: PcgRng,
            game_seed,
            start_map: None,
        }
    }

    pub fn with_start_map(mut self, map: impl Into<String>) -> Self {
        self.start_map = Some(map.into());
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// A fresh session on the main menu.
    pub fn session(&self) -> GameSession<'_> {
        let env = Env::with_all(
            &self.content.maps,
            &self.content.quests,
            &self.content.units,
            &self.rng,
        )
        .as_game_env();
        let session = GameSession::new(env, self.content.config.clone(), self.game_seed);
        match &self.start_map {
            Some(map) => session.with_start_map(map.clone()),
            None => session,
        }
    }
}

/// Opens the bincode save repository under `config.save_dir`.
pub fn open_saves(config: &RuntimeConfig) -> Result<FileSnapshotRepository> {
    Ok(FileSnapshotRepository::new(&config.save_dir)?)
}
