// src/search/filter.rs
//! Conjunctive predicate filter over job postings

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::debug;

use crate::types::{FilterCriteria, JobPosting, Predicate};
use crate::utils::contains_ignore_case;

/// Criteria pre-normalized once per filter run
struct PreparedCriteria<'a> {
    criteria: &'a FilterCriteria,
    search_term: Option<String>,
    location: Option<String>,
    industries: BTreeSet<String>,
    cutoff: Option<DateTime<Utc>>,
}

impl<'a> PreparedCriteria<'a> {
    fn new(criteria: &'a FilterCriteria, now: DateTime<Utc>) -> Self {
        Self {
            criteria,
            search_term: criteria.normalized_search_term(),
            location: criteria.normalized_location(),
            industries: criteria.normalized_industries(),
            cutoff: criteria.date_posted.map(|bucket| bucket.cutoff(now)),
        }
    }

    fn rejection(&self, posting: &JobPosting) -> Option<Predicate> {
        if let Some(term) = &self.search_term {
            let hit = contains_ignore_case(&posting.title, term)
                || contains_ignore_case(&posting.company_name, term)
                || contains_ignore_case(&posting.location, term)
                || posting
                    .skills
                    .iter()
                    .any(|skill| contains_ignore_case(skill, term));
            if !hit {
                return Some(Predicate::TextSearch);
            }
        }

        if let Some(job_type) = &self.criteria.job_type {
            if &posting.job_type != job_type {
                return Some(Predicate::JobType);
            }
        }

        if let Some(remote) = self.criteria.remote {
            if posting.remote_option != remote {
                return Some(Predicate::Remote);
            }
        }

        if let Some(level) = &self.criteria.experience_level {
            if &posting.experience_level != level {
                return Some(Predicate::ExperienceLevel);
            }
        }

        if let Some(cutoff) = self.cutoff {
            // unknown dates never fall inside a bucket
            if !posting.created_at.is_some_and(|created| created >= cutoff) {
                return Some(Predicate::DatePosted);
            }
        }

        if let Some(location) = &self.location {
            if !contains_ignore_case(&posting.location, location) {
                return Some(Predicate::Location);
            }
        }

        if !self.industries.is_empty()
            && !self.industries.contains(&posting.industry.to_lowercase())
        {
            return Some(Predicate::Industry);
        }

        None
    }
}

/// First predicate (in evaluation order) rejecting `posting`, `None` if it matches
pub fn rejection(
    posting: &JobPosting,
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Option<Predicate> {
    PreparedCriteria::new(criteria, now).rejection(posting)
}

/// Whether `posting` satisfies every active predicate of `criteria`
pub fn matches(posting: &JobPosting, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    rejection(posting, criteria, now).is_none()
}

/// Postings satisfying `criteria`, in input order
pub fn filter(
    postings: &[JobPosting],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<JobPosting> {
    let prepared = PreparedCriteria::new(criteria, now);
    let kept: Vec<JobPosting> = postings
        .iter()
        .filter(|posting| prepared.rejection(posting).is_none())
        .cloned()
        .collect();

    debug!(
        "Filter kept {}/{} postings (active: {:?})",
        kept.len(),
        postings.len(),
        criteria.active_predicates()
    );

    kept
}
