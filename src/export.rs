// src/export.rs
//! Rendering of search results for stdout

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt::Write as _;

use crate::search::SearchResults;
use crate::types::JobPosting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    #[default]
    Table,
}

const CSV_HEADERS: [&str; 11] = [
    "id",
    "title",
    "companyName",
    "location",
    "jobType",
    "experienceLevel",
    "industry",
    "skills",
    "remoteOption",
    "createdAt",
    "isRecommended",
];

pub fn render(results: &SearchResults, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(results).context("Failed to serialize results to JSON")
        }
        OutputFormat::Csv => render_csv(&results.jobs),
        OutputFormat::Table => Ok(render_table(results)),
    }
}

fn render_csv(jobs: &[JobPosting]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADERS)
        .context("Failed to write CSV header")?;

    for job in jobs {
        let created_at = job.created_at.map(|dt| dt.to_rfc3339()).unwrap_or_default();
        writer
            .write_record([
                job.id.as_str(),
                job.title.as_str(),
                job.company_name.as_str(),
                job.location.as_str(),
                job.job_type.as_str(),
                job.experience_level.as_str(),
                job.industry.as_str(),
                job.skills.join(";").as_str(),
                if job.remote_option { "true" } else { "false" },
                created_at.as_str(),
                if job.is_recommended { "true" } else { "false" },
            ])
            .with_context(|| format!("Failed to write CSV row for job {}", job.id))?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn render_table(results: &SearchResults) -> String {
    let mut out = String::new();

    for job in &results.jobs {
        let marker = if job.is_recommended { "*" } else { " " };
        let posted = job
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let remote = if job.remote_option { " (remote)" } else { "" };
        let _ = writeln!(
            out,
            "{} {} {:<32} {:<24} {}{}",
            marker,
            posted,
            truncate(&job.title, 32),
            truncate(&job.company_name, 24),
            job.location,
            remote
        );
    }

    let _ = writeln!(
        out,
        "{} of {} postings ({} recommended)",
        results.matched, results.merged, results.recommended
    );
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_timestamp;

    fn results() -> SearchResults {
        let jobs = vec![
            JobPosting {
                id: "1".into(),
                title: "Engineer, Platform".into(),
                company_name: "Ferris".into(),
                skills: vec!["Rust".into(), "Go".into()],
                remote_option: true,
                created_at: parse_timestamp("2024-01-03"),
                is_recommended: true,
                ..JobPosting::default()
            },
            JobPosting::new("2", "Analyst"),
        ];
        SearchResults {
            merged: 3,
            matched: 2,
            recommended: 1,
            jobs,
        }
    }

    #[test]
    fn test_csv_quotes_and_joins() {
        let csv = render(&results(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,title,companyName"));
        assert!(lines[1].starts_with("1,\"Engineer, Platform\",Ferris"));
        assert!(lines[1].contains("Rust;Go,true,2024-01-03T00:00:00+00:00,true"));
        assert!(lines[2].ends_with(",false,,false"));
    }

    #[test]
    fn test_json_contains_counts_and_jobs() {
        let json = render(&results(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["matched"], 2);
        assert_eq!(value["jobs"][0]["companyName"], "Ferris");
        assert_eq!(value["jobs"][0]["isRecommended"], true);
        assert!(value["jobs"][1]["createdAt"].is_null());
    }

    #[test]
    fn test_table_marks_recommended() {
        let table = render(&results(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("* 2024-01-03 Engineer, Platform"));
        assert!(lines[0].ends_with("(remote)"));
        assert!(lines[1].starts_with("  ---------- Analyst"));
        assert_eq!(lines[2], "2 of 3 postings (1 recommended)");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
