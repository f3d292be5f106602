// src/feed/mod.rs
//! Boundary between the activity aggregator and whatever produces the feed.
//!
//! Fetch failures never reach the aggregator: they are logged, counted, and
//! turned into an empty list. The cache holds events only; summaries are
//! recomputed from it per request.

pub mod file;
pub mod types;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use tokio::task::JoinHandle;

use crate::activity::RawActivityEvent;
pub use file::{parse_events, FileFeed};
pub use types::{FeedSource, StaticFeed};

/// Fetch from `source`, substituting an empty list on any error.
pub async fn load_or_empty(source: &dyn FeedSource) -> Vec<RawActivityEvent> {
    crate::metrics::ensure_described();
    match source.fetch_events().await {
        Ok(events) => {
            counter!("feed_events_total").increment(events.len() as u64);
            events
        }
        Err(e) => {
            tracing::warn!(target: "feed", error = ?e, source = source.name(), "feed fetch failed");
            counter!("feed_errors_total").increment(1);
            Vec::new()
        }
    }
}

#[derive(Debug, Default)]
struct Snapshot {
    events: Vec<RawActivityEvent>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Latest fetched feed, shared between the refresh task and handlers.
#[derive(Debug, Clone, Default)]
pub struct FeedCache {
    inner: Arc<RwLock<Snapshot>>,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, events: Vec<RawActivityEvent>, at: DateTime<Utc>) {
        let mut snap = self.inner.write().expect("feed cache lock poisoned");
        snap.events = events;
        snap.refreshed_at = Some(at);
    }

    pub fn events(&self) -> Vec<RawActivityEvent> {
        self.inner
            .read()
            .expect("feed cache lock poisoned")
            .events
            .clone()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().expect("feed cache lock poisoned").refreshed_at
    }

    /// Pull once from `source` into the cache. Returns the number of events kept.
    pub async fn refresh_from(&self, source: &dyn FeedSource) -> usize {
        let events = load_or_empty(source).await;
        let n = events.len();
        let now = Utc::now();
        self.replace(events, now);
        gauge!("feed_last_refresh_ts").set(now.timestamp() as f64);
        n
    }
}

/// Refresh `cache` from `source` on every tick (the first tick fires at once).
pub fn spawn_refresh(
    source: Arc<dyn FeedSource>,
    cache: FeedCache,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let kept = cache.refresh_from(source.as_ref()).await;
            tracing::info!(target: "feed", source = source.name(), kept, "feed refresh tick");
        }
    })
}
