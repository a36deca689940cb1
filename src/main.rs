use anyhow::Result;
use clap::Parser;
use job_search::cli::{handle_command, Cli};
use job_search::core::ConfigManager;
use job_search::logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first, it decides where logs go
    let config = ConfigManager::load()?;
    logging::init(&config.logging)?;

    info!("Starting jobscout");
    info!("Environment: {}", config.environment);
    info!("Job API: {}", config.service.job_api_url);
    info!("Search debounce: {} ms", config.search.debounce_ms);

    handle_command(cli, &config).await
}
