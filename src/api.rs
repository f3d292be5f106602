//! HTTP surface for the dashboard: synthetic contribution year, heatmap grid,
//! and activity summaries (posted feed or the cached one).

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, FixedOffset, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::activity::summary::CategoryValue;
use crate::activity::{self, ActivitySummary, RawActivityEvent, RecentActivity};
use crate::config::AppConfig;
use crate::contributions::{self, DailyActivity};
use crate::feed::FeedCache;
use crate::heatmap::HeatmapGrid;

type ApiError = (StatusCode, String);

#[derive(Clone)]
pub struct AppState {
    /// Local calendar for the contribution year and month headings.
    pub offset: FixedOffset,
    pub feed: FeedCache,
}

impl AppState {
    pub fn new(offset: FixedOffset, feed: FeedCache) -> Self {
        Self { offset, feed }
    }

    pub fn from_config(cfg: &AppConfig, feed: FeedCache) -> anyhow::Result<Self> {
        Ok(Self::new(cfg.calendar_offset()?, feed))
    }
}

pub fn router(state: AppState) -> Router {
    crate::metrics::ensure_described();
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/contributions", get(contributions_year))
        .route("/contributions/heatmap", get(contributions_heatmap))
        .route("/activity/summary", get(cached_summary).post(posted_summary))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct NowQuery {
    /// RFC 3339 instant; defaults to the wall clock.
    now: Option<String>,
}

fn resolve_now(q: &NowQuery, offset: FixedOffset) -> Result<DateTime<FixedOffset>, ApiError> {
    match q.now.as_deref() {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&offset))
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid `now` {raw:?}: {e}"))),
        None => Ok(Utc::now().with_timezone(&offset)),
    }
}

fn synthesize(q: &NowQuery, offset: FixedOffset) -> Result<Vec<DailyActivity>, ApiError> {
    let now = resolve_now(q, offset)?;
    let days = contributions::generate(&now);
    counter!("contributions_generated_total").increment(1);
    tracing::debug!(target: "contributions", %now, days = days.len(), "synthetic year generated");
    Ok(days)
}

async fn contributions_year(
    State(state): State<AppState>,
    Query(q): Query<NowQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let days = synthesize(&q, state.offset)?;
    let body = serde_json::to_vec(&days)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let etag = body_etag(&body);

    let fresh = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag);
    if fresh {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::ETAG, etag),
        ],
        body,
    )
        .into_response())
}

async fn contributions_heatmap(
    State(state): State<AppState>,
    Query(q): Query<NowQuery>,
) -> Result<Json<HeatmapGrid>, ApiError> {
    let days = synthesize(&q, state.offset)?;
    Ok(Json(HeatmapGrid::from_days(&days)))
}

/// Strong ETag from the first bytes of the body's SHA-256.
fn body_etag(body: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(body);
    let mut out = String::with_capacity(18);
    out.push('"');
    for b in digest.iter().take(8) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out.push('"');
    out
}

#[derive(Debug, Serialize)]
pub struct RecentView {
    #[serde(flatten)]
    pub entry: RecentActivity,
    pub time_ago: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub counters: activity::ActivityCounters,
    pub placeholder: bool,
    pub distinct_repositories: Vec<String>,
    pub recent_activity: Vec<RecentView>,
    pub series: [CategoryValue; 4],
    pub month_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl SummaryView {
    fn build(summary: ActivitySummary, offset: FixedOffset, now: DateTime<Utc>) -> Self {
        let series = summary.category_series();
        let month_label = activity::activity_month(&summary.recent_activity, &offset);
        let recent_activity = summary
            .recent_activity
            .into_iter()
            .map(|entry| RecentView {
                time_ago: activity::time_ago(entry.time, now),
                entry,
            })
            .collect();
        Self {
            counters: summary.counters,
            placeholder: summary.placeholder,
            distinct_repositories: summary.distinct_repositories,
            recent_activity,
            series,
            month_label,
            refreshed_at: None,
        }
    }
}

fn summarize_feed(events: &[RawActivityEvent]) -> ActivitySummary {
    counter!("activity_events_total").increment(events.len() as u64);
    let summary = activity::summarize(events);
    if summary.placeholder {
        counter!("activity_fallback_total").increment(1);
    }
    summary
}

async fn posted_summary(
    State(state): State<AppState>,
    Json(events): Json<Vec<RawActivityEvent>>,
) -> Json<SummaryView> {
    let summary = summarize_feed(&events);
    Json(SummaryView::build(summary, state.offset, Utc::now()))
}

async fn cached_summary(State(state): State<AppState>) -> Json<SummaryView> {
    let events = state.feed.events();
    let summary = summarize_feed(&events);
    let mut view = SummaryView::build(summary, state.offset, Utc::now());
    view.refreshed_at = state.feed.refreshed_at();
    Json(view)
}
