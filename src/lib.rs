// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod activity;
pub mod api;
pub mod config;
pub mod contributions;
pub mod feed;
pub mod heatmap;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::activity::{summarize, ActivitySummary, EventDetail, RawActivityEvent};
pub use crate::api::router;
pub use crate::contributions::{generate, DailyActivity};

use std::sync::Arc;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::feed::{FeedCache, FeedSource, FileFeed};

/// Build the full application Router from config: state, feed cache and the
/// background refresh task. Must be called inside a Tokio runtime.
///
/// Metrics are not installed here; the binary merges `/metrics` itself.
pub fn app(cfg: &AppConfig) -> anyhow::Result<axum::Router> {
    let cache = FeedCache::new();
    let source: Arc<dyn FeedSource> = Arc::new(FileFeed::new(cfg.feed.path.clone()));
    feed::spawn_refresh(source, cache.clone(), cfg.refresh_interval());

    let state = AppState::from_config(cfg, cache)?;
    tracing::info!(
        offset_minutes = cfg.calendar.utc_offset_minutes,
        feed = %cfg.feed.path.display(),
        refresh_secs = cfg.feed.refresh_secs,
        "profile pulse configured"
    );
    Ok(api::router(state))
}
