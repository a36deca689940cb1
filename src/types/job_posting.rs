// src/types/job_posting.rs
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::utils::{parse_timestamp, timestamp_from_millis};

/// One job advertisement as served by the job API.
///
/// Decoding is lenient: missing or oddly typed fields fall back to empty
/// values instead of failing the record. Only `id` is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub company_name: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub job_type: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub experience_level: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub industry: String,
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub remote_option: bool,
    /// `None` when the source had no usable timestamp
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the merge step, never by the job API
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub is_recommended: bool,
}

impl JobPosting {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Copy of this posting carrying the given recommendation flag
    pub fn tagged(&self, recommended: bool) -> Self {
        Self {
            is_recommended: recommended,
            ..self.clone()
        }
    }
}

/// Decode a job list payload, skipping records that cannot be decoded.
///
/// Accepts either a bare array or an object wrapping the array under `jobs`.
pub fn decode_postings(payload: Value) -> Vec<JobPosting> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("jobs") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("Job payload object has no `jobs` array, treating as empty");
                Vec::new()
            }
        },
        Value::Null => Vec::new(),
        other => {
            warn!("Unexpected job payload shape: {}", type_name(&other));
            Vec::new()
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<JobPosting>(item) {
            Ok(posting) => Some(posting),
            Err(e) => {
                warn!("Skipping job record #{}: {}", index, e);
                None
            }
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "job id must be a non-empty string or number, got {}",
            type_name(&other)
        ))),
    }
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn deserialize_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_i64().is_some_and(|v| v != 0),
        _ => false,
    })
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_timestamp(&s),
        Value::Number(n) => n.as_i64().and_then(timestamp_from_millis),
        _ => None,
    })
}
