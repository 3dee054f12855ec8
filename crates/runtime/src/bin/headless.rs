//! Headless smoke run: loads the content directory, starts a new game, runs a
//! number of idle frames and saves the result into slot 0.
//!
//! Usage: `headless [FRAMES]` (default 100). Configuration comes from the
//! environment, see [`RuntimeConfig::from_env`].
use anyhow::Result;
use isle_runtime::{
    GameData, GameLoop, LogErrors, NullSink, RuntimeConfig, ScriptedInput, open_saves,
    setup_logging,
};

const DEFAULT_FRAMES: usize = 100;

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    setup_logging(config.log_dir.as_deref())?;

    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let data = GameData::load(&config)?;
    let mut session = data.session();
    session.new_game()?;

    let mut input = ScriptedInput::default();
    input.idle(frames);

    let mut game = GameLoop::new(session, input, NullSink, LogErrors)
        .unpaced()
        .with_repository(open_saves(&config)?);
    let ran = game.run();
    game.save(0)?;

    tracing::info!(
        frames = ran,
        seed = data.game_seed(),
        saves = %config.save_dir.display(),
        "headless run finished"
    );
    Ok(())
}
