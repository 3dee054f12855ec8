//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

const APPLICATION: &str = "isle";

/// Where content and saves live, and how the session is seeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game_seed: u64,
    pub content_dir: PathBuf,
    pub save_dir: PathBuf,
    /// `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    /// Overrides the start map named by the map catalog.
    pub start_map: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_seed: 0,
            content_dir: data_dir().join("content"),
            save_dir: data_dir().join("saves"),
            log_dir: None,
            start_map: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    ///
    /// Environment variables:
    /// - `GAME_SEED` - Seed for combat rolls (default: random)
    /// - `GAME_CONTENT_DIR` - Content directory (default: platform data dir + `content`)
    /// - `SAVE_DATA_DIR` - Directory for save slots (default: platform data dir + `saves`)
    /// - `GAME_LOG_DIR` - Log to `isle.log` in this directory instead of stderr
    ///   (empty: platform cache dir + `logs`)
    /// - `GAME_START_MAP` - Start map override
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.game_seed = read_env::<u64>(&lookup, "GAME_SEED").unwrap_or_else(rand::random);

        if let Some(dir) = lookup("GAME_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup("SAVE_DATA_DIR") {
            config.save_dir = PathBuf::from(dir);
        }

        // An empty value selects the platform log directory.
        config.log_dir = lookup("GAME_LOG_DIR").map(|dir| {
            if dir.is_empty() {
                log_dir()
            } else {
                PathBuf::from(dir)
            }
        });
        config.start_map = lookup("GAME_START_MAP").filter(|name| !name.is_empty());

        config
    }
}

/// Platform data directory for the game.
///
/// - Linux: `~/.local/share/isle` (or `$XDG_DATA_HOME/isle`)
/// - macOS: `~/Library/Application Support/isle`
/// - Windows: `%APPDATA%\isle`
/// - Fallback: `./isle_data`
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./isle_data"))
}

/// Platform cache directory for logs.
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/isle"))
        .join("logs")
}

fn read_env<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}
