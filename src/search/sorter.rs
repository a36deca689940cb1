// src/search/sorter.rs
use std::cmp::Reverse;

use crate::types::JobPosting;

/// Display order: recommended first, then newest first.
///
/// Postings without a known `created_at` sort after every dated posting of
/// their group. The sort is stable, so full ties keep their input order.
pub fn sort(postings: &[JobPosting]) -> Vec<JobPosting> {
    let mut sorted = postings.to_vec();
    sorted.sort_by_key(|posting| {
        (
            Reverse(posting.is_recommended),
            Reverse(posting.created_at),
        )
    });
    sorted
}
