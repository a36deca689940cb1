// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use crate::core::{ConfigManager, FsOps, JobApiClient};
use crate::export::{render, OutputFormat};
use crate::search::{
    record_search_term, JobSearchPipeline, LogOnlySink, SearchDebouncer, SearchTermSink,
};
use crate::types::{DatePosted, FilterCriteria, JobPosting};

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Merge, filter and rank job postings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one search over local job lists
    Search {
        #[command(flatten)]
        sources: LocalSources,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Run one search over the lists served by the job API
    Fetch {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Read search terms from stdin, debounce them and re-run the search
    Interactive {
        #[command(flatten)]
        sources: LocalSources,
        #[command(flatten)]
        filters: FilterArgs,
        /// Send debounced terms to the job API search log instead of only logging them
        #[arg(long)]
        record: bool,
    },
}

#[derive(Args)]
pub struct LocalSources {
    /// JSON list of postings recommended for the user
    #[arg(long)]
    pub recommended: Option<PathBuf>,
    /// JSON list of all postings
    #[arg(long = "all")]
    pub all: PathBuf,
}

impl LocalSources {
    pub async fn load(&self) -> Result<(Vec<JobPosting>, Vec<JobPosting>)> {
        let recommended = match &self.recommended {
            Some(path) => FsOps::load_postings(path)
                .await
                .context("Failed to load recommended postings")?,
            None => Vec::new(),
        };
        let general = FsOps::load_postings(&self.all)
            .await
            .context("Failed to load job postings")?;
        Ok((recommended, general))
    }
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// Saved criteria (.json or .toml); flags below override it
    #[arg(long)]
    pub criteria: Option<PathBuf>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub job_type: Option<String>,
    #[arg(long)]
    pub experience_level: Option<String>,
    #[arg(long)]
    pub remote: Option<bool>,
    /// Accepted industry, repeatable
    #[arg(long)]
    pub industry: Vec<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// 24h, week, month or any
    #[arg(long)]
    pub date_posted: Option<String>,
}

impl FilterArgs {
    /// Criteria file (if any) with the command-line flags layered on top
    pub async fn resolve(&self) -> Result<FilterCriteria> {
        let base = match &self.criteria {
            Some(path) => FsOps::load_criteria(path).await?,
            None => FilterCriteria::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, base: FilterCriteria) -> FilterCriteria {
        let overrides = FilterCriteria {
            search_term: self.search.clone(),
            job_type: self.job_type.clone(),
            experience_level: self.experience_level.clone(),
            remote: self.remote,
            industry: self.industry.iter().cloned().collect(),
            location: self.location.clone(),
            date_posted: self.date_posted.as_deref().and_then(DatePosted::parse),
        };

        let mut criteria = base.overlay(overrides);
        // an explicit "any" clears a bucket coming from the criteria file
        if matches!(&self.date_posted, Some(raw) if DatePosted::parse(raw).is_none()) {
            criteria.date_posted = None;
        }
        criteria
    }
}

pub async fn handle_command(cli: Cli, config: &ConfigManager) -> Result<()> {
    match cli.command {
        Command::Search {
            sources,
            filters,
            format,
        } => {
            let (recommended, general) = sources.load().await?;
            let criteria = filters.resolve().await?;

            let results =
                JobSearchPipeline.run(Some(&recommended[..]), Some(&general[..]), &criteria);
            println!("{}", render(&results, format)?);
        }

        Command::Fetch { filters, format } => {
            let criteria = filters.resolve().await?;
            let client = JobApiClient::new(&config.service)?;

            let (recommended, general) =
                tokio::try_join!(client.fetch_recommended(), client.fetch_all())
                    .context("Failed to fetch job lists")?;

            if let Some(term) = &criteria.search_term {
                record_search_term(&client, term).await;
            }

            let results =
                JobSearchPipeline.run(Some(&recommended[..]), Some(&general[..]), &criteria);
            println!("{}", render(&results, format)?);
        }

        Command::Interactive {
            sources,
            filters,
            record,
        } => {
            let (recommended, general) = sources.load().await?;
            let criteria = filters.resolve().await?;

            if record {
                let client = JobApiClient::new(&config.service)?;
                run_interactive(config, &recommended, &general, criteria, &client).await?;
            } else {
                run_interactive(config, &recommended, &general, criteria, &LogOnlySink).await?;
            }
        }
    }

    Ok(())
}

/// Each stdin line replaces the search term. Debounced terms go to `sink`
/// and trigger a fresh search. EOF flushes the last term; Ctrl-C drops it.
async fn run_interactive<S: SearchTermSink>(
    config: &ConfigManager,
    recommended: &[JobPosting],
    general: &[JobPosting],
    base: FilterCriteria,
    sink: &S,
) -> Result<()> {
    let (tx, mut terms) = mpsc::unbounded_channel::<String>();
    let mut debouncer = Some(SearchDebouncer::new(config.search.debounce_delay(), tx));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!(
        "Interactive search started (debounce {:?})",
        config.search.debounce_delay()
    );

    loop {
        tokio::select! {
            line = lines.next_line(), if debouncer.is_some() => {
                match line.context("Failed to read search term from stdin")? {
                    Some(term) => {
                        if let Some(debouncer) = debouncer.as_mut() {
                            debouncer.push(term);
                        }
                    }
                    None => {
                        if let Some(debouncer) = debouncer.take() {
                            debouncer.finish();
                        }
                    }
                }
            }
            term = terms.recv() => {
                let Some(term) = term else { break };
                record_search_term(sink, &term).await;

                let criteria = FilterCriteria {
                    search_term: Some(term),
                    ..base.clone()
                };
                let results = JobSearchPipeline.run(Some(recommended), Some(general), &criteria);
                println!("{}", render(&results, OutputFormat::Table)?);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interactive search interrupted");
                break;
            }
        }
    }

    Ok(())
}
