// src/core/fs_ops.rs
//! Local job lists and saved search criteria

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::types::{decode_postings, FilterCriteria, JobPosting};
use crate::utils::get_file_extension;

pub struct FsOps;

impl FsOps {
    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Load a JSON job list, either a bare array or `{ "jobs": [...] }`.
    /// Undecodable records are skipped with a warning.
    pub async fn load_postings(path: &Path) -> Result<Vec<JobPosting>> {
        let content = Self::read_file_safe(path).await?;
        let payload: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in job list: {}", path.display()))?;

        let postings = decode_postings(payload);
        info!("Loaded {} postings from {}", postings.len(), path.display());
        Ok(postings)
    }

    /// Load saved criteria from a `.json` or `.toml` file
    pub async fn load_criteria(path: &Path) -> Result<FilterCriteria> {
        let content = Self::read_file_safe(path).await?;
        let file_name = path.to_string_lossy();

        match get_file_extension(&file_name).as_deref() {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid criteria JSON: {}", path.display())),
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Invalid criteria TOML: {}", path.display())),
            _ => anyhow::bail!(
                "Unsupported criteria file: {}. Use .json or .toml",
                path.display()
            ),
        }
    }
}
