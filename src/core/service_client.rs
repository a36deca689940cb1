// src/core/service_client.rs
//! HTTP client for the job API: both job lists and the search log

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, trace};

use super::config_manager::ServiceConfig;
use crate::search::SearchTermSink;
use crate::types::{decode_postings, JobPosting};

const RECOMMENDED_JOBS_ENDPOINT: &str = "/jobs/recommended";
const ALL_JOBS_ENDPOINT: &str = "/jobs";
const SEARCH_LOG_ENDPOINT: &str = "/search-log";

pub struct JobApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl JobApiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.job_api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Postings the backend recommends for the current user
    pub async fn fetch_recommended(&self) -> Result<Vec<JobPosting>> {
        self.fetch_postings(RECOMMENDED_JOBS_ENDPOINT).await
    }

    /// Every open posting
    pub async fn fetch_all(&self) -> Result<Vec<JobPosting>> {
        self.fetch_postings(ALL_JOBS_ENDPOINT).await
    }

    /// Send a debounced search term to the search log
    pub async fn record_search_term(&self, term: &str) -> Result<()> {
        let url = self.url(SEARCH_LOG_ENDPOINT);
        trace!("Posting search term to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "term": term }))
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Search log returned error status {}: {}", status, error_text)
        }
    }

    async fn fetch_postings(&self, endpoint: &str) -> Result<Vec<JobPosting>> {
        let url = self.url(endpoint);
        info!("Fetching job postings: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if status.is_success() {
            let payload: Value = response
                .json()
                .await
                .with_context(|| format!("Failed to parse job list from {}", url))?;
            let postings = decode_postings(payload);
            info!("Received {} postings from {}", postings.len(), endpoint);
            Ok(postings)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error from {}: {}", status, url, error_text)
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl SearchTermSink for JobApiClient {
    async fn record(&self, term: &str) -> Result<()> {
        self.record_search_term(term).await
    }
}
