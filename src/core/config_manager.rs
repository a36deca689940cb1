// src/core/config_manager.rs
//! Configuration: defaults, optional config.yaml profile, environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub job_api_url: String,
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            job_api_url: "http://127.0.0.1:5555".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl SearchConfig {
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: PathBuf,
    /// Filter directives used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("/tmp/jobscout.log"),
            level: "info".to_string(),
        }
    }
}

/// One profile of config.yaml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    service: ServiceConfig,
    search: SearchConfig,
    logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: Option<Settings>,
    production: Option<Settings>,
}

impl ConfigManager {
    /// Load configuration from the process environment and config file
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let yaml = match Self::config_path()? {
            Some(path) => Some(
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            ),
            None => None,
        };

        Self::from_sources(&environment, yaml.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build configuration from explicit sources; `env` looks up overrides
    pub fn from_sources<F>(environment: &str, yaml: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = match yaml {
            Some(content) => {
                let file: ConfigFile =
                    serde_yaml::from_str(content).context("Failed to parse config file")?;
                let profile = match environment {
                    "production" => file.production,
                    _ => file.local,
                };
                profile.unwrap_or_default()
            }
            None => Settings::default(),
        };

        let mut config = Self {
            environment: environment.to_string(),
            service: settings.service,
            search: settings.search,
            logging: settings.logging,
        };
        config.apply_env_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBSCOUT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn config_path() -> Result<Option<PathBuf>> {
        if let Ok(explicit) = std::env::var("JOBSCOUT_CONFIG") {
            let path = PathBuf::from(explicit);
            if !path.exists() {
                anyhow::bail!("JOBSCOUT_CONFIG points to a missing file: {}", path.display());
            }
            return Ok(Some(path));
        }

        let default = Path::new(DEFAULT_CONFIG_FILE);
        Ok(default.exists().then(|| default.to_path_buf()))
    }

    fn apply_env_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("JOB_API_URL") {
            self.service.job_api_url = url;
        }

        if let Some(raw) = env("JOBSCOUT_DEBOUNCE_MS") {
            self.search.debounce_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("JOBSCOUT_DEBOUNCE_MS must be milliseconds, got {raw:?}"))?;
        }

        if let Some(path) = env("JOBSCOUT_LOG_FILE") {
            self.logging.log_file = PathBuf::from(path);
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.service.job_api_url.starts_with("http://")
            && !self.service.job_api_url.starts_with("https://")
        {
            anyhow::bail!(
                "Job API URL must start with http:// or https://, got {}",
                self.service.job_api_url
            );
        }
        if self.service.timeout_seconds == 0 {
            anyhow::bail!("Service timeout must be at least one second");
        }
        Ok(())
    }
}
