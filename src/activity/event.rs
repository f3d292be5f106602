// src/activity/event.rs
//! Raw activity-feed records and their decoding from the upstream JSON shape
//! (`{ id, type, repo: { name }, payload, created_at }`).
//!
//! The payload is loosely typed upstream. Here it is narrowed into
//! [`EventDetail`], one variant per known kind, with absent fields kept as
//! `None` so the aggregator's defaults are applied structurally.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireEvent")]
pub struct RawActivityEvent {
    pub id: String,
    pub repo: String,
    pub created_at: DateTime<Utc>,
    pub detail: EventDetail,
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetail {
    /// `commits`: number of commits listed in the push, if the list was present.
    Push { commits: Option<u32> },
    PullRequest { action: Option<String> },
    Issue { action: Option<String> },
    PullRequestReview,
    Create { ref_type: Option<String> },
    Watch,
    Fork,
    Delete { ref_type: Option<String> },
    /// Anything outside the known vocabulary; keeps the upstream type name.
    Other { kind: String },
}

impl RawActivityEvent {
    pub fn new(
        id: impl Into<String>,
        repo: impl Into<String>,
        created_at: DateTime<Utc>,
        detail: EventDetail,
    ) -> Self {
        Self {
            id: id.into(),
            repo: repo.into(),
            created_at,
            detail,
        }
    }
}

impl EventDetail {
    /// Upstream type name, e.g. `PushEvent`.
    pub fn type_name(&self) -> &str {
        match self {
            EventDetail::Push { .. } => "PushEvent",
            EventDetail::PullRequest { .. } => "PullRequestEvent",
            EventDetail::Issue { .. } => "IssuesEvent",
            EventDetail::PullRequestReview => "PullRequestReviewEvent",
            EventDetail::Create { .. } => "CreateEvent",
            EventDetail::Watch => "WatchEvent",
            EventDetail::Fork => "ForkEvent",
            EventDetail::Delete { .. } => "DeleteEvent",
            EventDetail::Other { kind } => kind.as_str(),
        }
    }

    fn from_wire(kind: &str, payload: &Value) -> Self {
        match kind {
            "PushEvent" => EventDetail::Push {
                commits: payload
                    .get("commits")
                    .and_then(Value::as_array)
                    .map(|c| u32::try_from(c.len()).unwrap_or(u32::MAX)),
            },
            "PullRequestEvent" => EventDetail::PullRequest {
                action: text_field(payload, "action"),
            },
            "IssuesEvent" => EventDetail::Issue {
                action: text_field(payload, "action"),
            },
            "PullRequestReviewEvent" => EventDetail::PullRequestReview,
            "CreateEvent" => EventDetail::Create {
                ref_type: text_field(payload, "ref_type"),
            },
            "WatchEvent" => EventDetail::Watch,
            "ForkEvent" => EventDetail::Fork,
            "DeleteEvent" => EventDetail::Delete {
                ref_type: text_field(payload, "ref_type"),
            },
            other => EventDetail::Other {
                kind: other.to_string(),
            },
        }
    }
}

/// Non-empty string field; empty strings count as absent.
fn text_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Deserialize)]
struct WireEvent {
    #[serde(default, deserialize_with = "id_as_string")]
    id: String,
    #[serde(rename = "type", default)]
    kind: String,
    repo: WireRepo,
    #[serde(default)]
    payload: Value,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct WireRepo {
    name: String,
}

impl From<WireEvent> for RawActivityEvent {
    fn from(w: WireEvent) -> Self {
        let detail = EventDetail::from_wire(&w.kind, &w.payload);
        Self {
            id: w.id,
            repo: w.repo.name,
            created_at: w.created_at,
            detail,
        }
    }
}

// Upstream ids are strings, but some mirrors emit numbers.
fn id_as_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
