// src/logging.rs
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config_manager::LoggingConfig;

/// Install the global subscriber: JSON lines into the configured log file.
/// Stdout stays reserved for search results.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(env_filter(&config.level)?)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// `RUST_LOG` when set, else the configured directives
fn env_filter(default_directives: &str) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .context("Invalid RUST_LOG directives"),
        _ => EnvFilter::try_new(default_directives)
            .with_context(|| format!("Invalid log level: {}", default_directives)),
    }
}
