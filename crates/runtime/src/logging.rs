//! Tracing subscriber setup.

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "isle.log";

/// Install the global subscriber.
///
/// The filter defaults to `info` and is overridden by `RUST_LOG`. With a
/// `log_dir`, events are appended to `isle.log` there instead of stderr.
/// Writes are blocking so no background thread outlives the game loop.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| {
                anyhow::anyhow!("Failed to create log directory {}: {}", dir.display(), e)
            })?;
            let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;

            tracing::info!("Log file: {}", dir.join(LOG_FILE).display());
        }
        None => {
            let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;
        }
    }

    Ok(())
}
