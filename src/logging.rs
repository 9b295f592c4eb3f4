use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Send tracing output to a daily rolling file under `log_dir`.
///
/// The terminal belongs to the game screen, so nothing is written to stdout
/// or stderr. `RUST_LOG` takes precedence over `verbose`. Keep the returned
/// guard alive for as long as logs should be flushed.
pub fn setup_logging(log_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = rolling::daily(log_dir, "typerush.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(dir = %log_dir.display(), verbose, "logging initialized");
    Ok(guard)
}
