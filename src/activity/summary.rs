// src/activity/summary.rs
//! # Activity Aggregator
//! Pure pass over a newest-first activity feed: per-kind counters, a capped
//! recent-activity log, and the first few distinct repositories touched.
//!
//! Precondition: the caller supplies events newest-first. Nothing here sorts;
//! "recent" means "first in input order".

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::event::{EventDetail, RawActivityEvent};

pub const RECENT_ACTIVITY_CAP: usize = 8;
pub const DISTINCT_REPOSITORY_CAP: usize = 3;

/// Placeholder counters shown when the feed yields nothing countable, so the
/// category chart never renders empty.
pub const PLACEHOLDER_COMMITS: u32 = 83;
pub const PLACEHOLDER_PULL_REQUESTS: u32 = 17;
pub const PLACEHOLDER_ISSUES: u32 = 3;
pub const PLACEHOLDER_REVIEWS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Commit,
    #[serde(rename = "pr")]
    PullRequest,
    Issue,
    Review,
    Create,
    Star,
    Fork,
    Delete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivityCounters {
    pub commits: u32,
    pub pull_requests: u32,
    pub issues: u32,
    pub reviews: u32,
}

impl ActivityCounters {
    pub const PLACEHOLDER: ActivityCounters = ActivityCounters {
        commits: PLACEHOLDER_COMMITS,
        pull_requests: PLACEHOLDER_PULL_REQUESTS,
        issues: PLACEHOLDER_ISSUES,
        reviews: PLACEHOLDER_REVIEWS,
    };

    pub fn is_zero(&self) -> bool {
        self.commits == 0 && self.pull_requests == 0 && self.issues == 0 && self.reviews == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub kind: ActivityKind,
    pub description: String,
    pub repo: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub counters: ActivityCounters,
    /// True when `counters` holds the placeholder set rather than real counts.
    pub placeholder: bool,
    pub distinct_repositories: Vec<String>,
    pub recent_activity: Vec<RecentActivity>,
}

/// One `{category, value}` pair for the category chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryValue {
    pub name: &'static str,
    pub value: u32,
}

impl ActivitySummary {
    /// Counters as chart categories, in display order.
    pub fn category_series(&self) -> [CategoryValue; 4] {
        let c = &self.counters;
        [
            CategoryValue { name: "Commits", value: c.commits },
            CategoryValue { name: "Pull requests", value: c.pull_requests },
            CategoryValue { name: "Issues", value: c.issues },
            CategoryValue { name: "Code review", value: c.reviews },
        ]
    }
}

/// Classify and aggregate `events` (newest-first). Never fails.
pub fn summarize(events: &[RawActivityEvent]) -> ActivitySummary {
    let mut counters = ActivityCounters::default();
    let mut seen = HashSet::new();
    let mut repos: Vec<String> = Vec::new();
    let mut recent = Vec::new();

    for ev in events {
        // Every event touches the repository set, recognized kind or not.
        if seen.insert(ev.repo.as_str()) {
            repos.push(ev.repo.clone());
        }

        let Some((kind, description)) = classify(&ev.detail, &mut counters) else {
            continue;
        };
        recent.push(RecentActivity {
            kind,
            description,
            repo: ev.repo.clone(),
            time: ev.created_at,
        });
    }

    repos.truncate(DISTINCT_REPOSITORY_CAP);
    recent.truncate(RECENT_ACTIVITY_CAP);

    let placeholder = counters.is_zero();
    if placeholder {
        counters = ActivityCounters::PLACEHOLDER;
    }

    debug!(
        target: "activity",
        events = events.len(),
        recent = recent.len(),
        repos = repos.len(),
        placeholder,
        "activity summarized"
    );

    ActivitySummary {
        counters,
        placeholder,
        distinct_repositories: repos,
        recent_activity: recent,
    }
}

/// Bump the matching counter and describe the event; `None` for unknown kinds.
fn classify(
    detail: &EventDetail,
    counters: &mut ActivityCounters,
) -> Option<(ActivityKind, String)> {
    let entry = match detail {
        EventDetail::Push { commits } => {
            let n = commits.filter(|n| *n > 0).unwrap_or(1);
            counters.commits = counters.commits.saturating_add(n);
            let plural = if n > 1 { "s" } else { "" };
            (ActivityKind::Commit, format!("Pushed {n} commit{plural} to"))
        }
        EventDetail::PullRequest { action } => {
            counters.pull_requests += 1;
            let verb = action.as_deref().unwrap_or("Opened");
            (ActivityKind::PullRequest, format!("{verb} a pull request in"))
        }
        EventDetail::Issue { action } => {
            counters.issues += 1;
            let verb = action.as_deref().unwrap_or("Opened");
            (ActivityKind::Issue, format!("{verb} an issue in"))
        }
        EventDetail::PullRequestReview => {
            counters.reviews += 1;
            (ActivityKind::Review, "Reviewed a pull request in".to_string())
        }
        EventDetail::Create { ref_type } => {
            let what = ref_type.as_deref().unwrap_or("branch");
            (ActivityKind::Create, format!("Created {what} in"))
        }
        EventDetail::Watch => (ActivityKind::Star, "Starred".to_string()),
        EventDetail::Fork => (ActivityKind::Fork, "Forked".to_string()),
        EventDetail::Delete { ref_type } => {
            let what = ref_type.as_deref().unwrap_or("branch");
            (ActivityKind::Delete, format!("Deleted {what} in"))
        }
        EventDetail::Other { .. } => return None,
    };
    Some(entry)
}
