// src/search/pipeline.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::{filter, merger, sorter};
use crate::types::{FilterCriteria, JobPosting};

/// Ordered, filtered view of the job lists plus a few counts for logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub jobs: Vec<JobPosting>,
    /// Postings after merge, before filtering
    pub merged: usize,
    pub matched: usize,
    pub recommended: usize,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Merge, filter, sort. Stateless: every run works on its own inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobSearchPipeline;

impl JobSearchPipeline {
    pub fn run(
        &self,
        recommended: Option<&[JobPosting]>,
        general: Option<&[JobPosting]>,
        criteria: &FilterCriteria,
    ) -> SearchResults {
        self.run_at(recommended, general, criteria, Utc::now())
    }

    /// Same as [`run`](Self::run) with an explicit clock for the date buckets
    pub fn run_at(
        &self,
        recommended: Option<&[JobPosting]>,
        general: Option<&[JobPosting]>,
        criteria: &FilterCriteria,
        now: DateTime<Utc>,
    ) -> SearchResults {
        let merged = merger::merge_optional(recommended, general);
        let filtered = filter::filter(&merged, criteria, now);
        let jobs = sorter::sort(&filtered);

        let results = SearchResults {
            merged: merged.len(),
            matched: jobs.len(),
            recommended: jobs.iter().filter(|p| p.is_recommended).count(),
            jobs,
        };

        info!(
            "Job search: {} merged, {} matched, {} recommended",
            results.merged, results.matched, results.recommended
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DatePosted;
    use chrono::TimeDelta;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-05T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn job(id: &str, title: &str, days_ago: i64) -> JobPosting {
        JobPosting {
            id: id.into(),
            title: title.into(),
            created_at: Some(now() - TimeDelta::days(days_ago)),
            ..JobPosting::default()
        }
    }

    fn run(
        recommended: &[JobPosting],
        general: &[JobPosting],
        criteria: &FilterCriteria,
    ) -> SearchResults {
        JobSearchPipeline.run_at(Some(recommended), Some(general), criteria, now())
    }

    fn ids(results: &SearchResults) -> Vec<&str> {
        results.jobs.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_order() {
        let recommended = vec![job("1", "Engineer", 2)];
        let general = vec![
            job("1", "Engineer", 2),
            job("2", "Analyst", 4),
            job("3", "Engineer II", 1),
        ];

        let results = run(&recommended, &general, &FilterCriteria::default());

        assert_eq!(ids(&results), vec!["1", "3", "2"]);
        assert_eq!((results.merged, results.matched, results.recommended), (3, 3, 1));
        assert!(results.jobs[0].is_recommended);
        assert!(!results.jobs[1].is_recommended);
    }

    #[test]
    fn test_filter_applies_after_merge() {
        let recommended = vec![job("r", "Analyst", 20)];
        let general = vec![job("g1", "Engineer", 1), job("g2", "Engineer", 3)];
        let criteria = FilterCriteria::default()
            .with_search_term("engineer")
            .with_date_posted(DatePosted::Week);

        let results = run(&recommended, &general, &criteria);

        assert_eq!(ids(&results), vec!["g1", "g2"]);
        assert_eq!(results.recommended, 0);
        assert_eq!(results.merged, 3);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let recommended = vec![job("a", "Same", 1), job("b", "Same", 1)];
        let general = vec![job("c", "Same", 1), job("d", "Same", 1), job("a", "Same", 1)];
        let criteria = FilterCriteria::default().with_search_term("same");

        let first = run(&recommended, &general, &criteria);
        let second = run(&recommended, &general, &criteria);

        assert_eq!(first, second);
        assert_eq!(ids(&first), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_absent_lists_yield_empty_results() {
        let results = JobSearchPipeline.run(None, None, &FilterCriteria::default());
        assert!(results.is_empty());
        assert_eq!(results.merged, 0);
    }
}
