// src/types/criteria.rs
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::utils::normalize_term;

/// "Date posted" bucket, relative to the moment the filter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DatePosted {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
}

impl DatePosted {
    /// `"any"` and unknown values disable the predicate, hence `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "24h" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn window(self) -> TimeDelta {
        match self {
            Self::Day => TimeDelta::hours(24),
            Self::Week => TimeDelta::days(7),
            Self::Month => TimeDelta::days(30),
        }
    }

    /// Oldest `created_at` still inside the bucket
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window()
    }
}

impl fmt::Display for DatePosted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names of the independent filter predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    TextSearch,
    JobType,
    Remote,
    ExperienceLevel,
    DatePosted,
    Location,
    Industry,
}

impl Predicate {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextSearch => "search",
            Self::JobType => "job_type",
            Self::Remote => "remote",
            Self::ExperienceLevel => "experience_level",
            Self::DatePosted => "date_posted",
            Self::Location => "location",
            Self::Industry => "industry",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active search state. `None` / empty set means "filter not applied";
/// `Some(String::new())` on an exact-match field requires an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_term: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub remote: Option<bool>,
    pub industry: BTreeSet<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "deserialize_date_posted")]
    pub date_posted: Option<DatePosted>,
}

impl FilterCriteria {
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = Some(job_type.into());
        self
    }

    pub fn with_experience_level(mut self, level: impl Into<String>) -> Self {
        self.experience_level = Some(level.into());
        self
    }

    pub fn with_remote(mut self, remote: bool) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry.insert(industry.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_date_posted(mut self, bucket: DatePosted) -> Self {
        self.date_posted = Some(bucket);
        self
    }

    /// Search term ready for substring matching, `None` when blank
    pub fn normalized_search_term(&self) -> Option<String> {
        normalize_term(self.search_term.as_deref())
    }

    pub fn normalized_location(&self) -> Option<String> {
        normalize_term(self.location.as_deref())
    }

    pub fn normalized_industries(&self) -> BTreeSet<String> {
        self.industry.iter().map(|i| i.to_lowercase()).collect()
    }

    /// Predicates that can reject a posting under these criteria
    pub fn active_predicates(&self) -> Vec<Predicate> {
        let mut active = Vec::new();
        if self.normalized_search_term().is_some() {
            active.push(Predicate::TextSearch);
        }
        if self.job_type.is_some() {
            active.push(Predicate::JobType);
        }
        if self.remote.is_some() {
            active.push(Predicate::Remote);
        }
        if self.experience_level.is_some() {
            active.push(Predicate::ExperienceLevel);
        }
        if self.date_posted.is_some() {
            active.push(Predicate::DatePosted);
        }
        if self.normalized_location().is_some() {
            active.push(Predicate::Location);
        }
        if !self.industry.is_empty() {
            active.push(Predicate::Industry);
        }
        active
    }

    /// Layer `overrides` on top of `self`; every field set in `overrides` wins
    pub fn overlay(self, overrides: FilterCriteria) -> Self {
        Self {
            search_term: overrides.search_term.or(self.search_term),
            job_type: overrides.job_type.or(self.job_type),
            experience_level: overrides.experience_level.or(self.experience_level),
            remote: overrides.remote.or(self.remote),
            industry: if overrides.industry.is_empty() {
                self.industry
            } else {
                overrides.industry
            },
            location: overrides.location.or(self.location),
            date_posted: overrides.date_posted.or(self.date_posted),
        }
    }
}

fn deserialize_date_posted<'de, D>(deserializer: D) -> Result<Option<DatePosted>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(DatePosted::parse))
}
