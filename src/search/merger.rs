// src/search/merger.rs
//! Merge of the "recommended for you" list into the general job list

use std::collections::HashSet;
use tracing::debug;

use crate::types::JobPosting;

/// Combine both lists into one without duplicate ids.
///
/// Recommended postings come first, tagged `is_recommended = true`, followed by
/// the general postings not already seen, tagged `false`. Relative order inside
/// each list is kept; a repeated id keeps its first occurrence.
pub fn merge(recommended: &[JobPosting], general: &[JobPosting]) -> Vec<JobPosting> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(recommended.len() + general.len());
    let mut merged = Vec::with_capacity(recommended.len() + general.len());

    for posting in recommended {
        if seen.insert(posting.id.as_str()) {
            merged.push(posting.tagged(true));
        }
    }

    let recommended_count = merged.len();

    for posting in general {
        if seen.insert(posting.id.as_str()) {
            merged.push(posting.tagged(false));
        }
    }

    debug!(
        "Merged {} recommended and {} general postings into {} ({} recommended)",
        recommended.len(),
        general.len(),
        merged.len(),
        recommended_count
    );

    merged
}

/// Same as [`merge`], treating an absent list as empty
pub fn merge_optional(
    recommended: Option<&[JobPosting]>,
    general: Option<&[JobPosting]>,
) -> Vec<JobPosting> {
    merge(recommended.unwrap_or_default(), general.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn job(id: &str, title: &str) -> JobPosting {
        JobPosting::new(id, title)
    }

    fn ids(postings: &[JobPosting]) -> Vec<&str> {
        postings.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_recommended_duplicate_appears_once_and_tagged() {
        let recommended = vec![job("1", "Engineer")];
        let general = vec![job("1", "Engineer"), job("2", "Analyst")];

        let merged = merge(&recommended, &general);

        assert_eq!(ids(&merged), vec!["1", "2"]);
        assert!(merged[0].is_recommended);
        assert!(!merged[1].is_recommended);
    }

    #[test]
    fn test_relative_order_preserved() {
        let recommended = vec![job("r2", "B"), job("r1", "A")];
        let general = vec![job("g3", "C"), job("r1", "A"), job("g1", "D"), job("g2", "E")];

        let merged = merge(&recommended, &general);
        assert_eq!(ids(&merged), vec!["r2", "r1", "g3", "g1", "g2"]);
    }

    #[test]
    fn test_general_flag_is_reset() {
        let mut stale = job("9", "Stale flag");
        stale.is_recommended = true;

        let merged = merge(&[], &[stale]);
        assert!(!merged[0].is_recommended);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let recommended = vec![job("1", "Engineer")];
        let general = vec![job("1", "Engineer")];
        let _ = merge(&recommended, &general);
        assert!(!recommended[0].is_recommended);
        assert!(!general[0].is_recommended);
    }

    #[test]
    fn test_no_duplicate_ids_even_within_one_list() {
        let recommended = vec![job("1", "A"), job("1", "A again")];
        let general = vec![job("2", "B"), job("3", "C"), job("2", "B again"), job("1", "A")];

        let merged = merge(&recommended, &general);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for posting in &merged {
            *counts.entry(posting.id.as_str()).or_default() += 1;
        }
        assert!(counts.values().all(|&c| c == 1));
        assert_eq!(merged[0].title, "A");
        assert_eq!(merged[1].title, "B");
        assert!(merged
            .iter()
            .filter(|p| recommended.iter().any(|r| r.id == p.id))
            .all(|p| p.is_recommended));
    }

    #[test]
    fn test_empty_and_absent_inputs() {
        assert!(merge(&[], &[]).is_empty());
        assert!(merge_optional(None, None).is_empty());

        let general = vec![job("1", "Only general")];
        let merged = merge_optional(None, Some(general.as_slice()));
        assert_eq!(ids(&merged), vec!["1"]);
        assert!(!merged[0].is_recommended);

        let recommended = vec![job("2", "Only recommended")];
        let merged = merge_optional(Some(recommended.as_slice()), None);
        assert!(merged[0].is_recommended);
    }
}
