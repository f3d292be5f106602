// src/feed/file.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::activity::RawActivityEvent;
use crate::feed::types::FeedSource;

/// Reads a JSON array of upstream-shaped events from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decode a feed document. Exposed for the HTTP layer and tests.
pub fn parse_events(json: &str) -> Result<Vec<RawActivityEvent>> {
    serde_json::from_str(json).context("decoding activity feed")
}

#[async_trait]
impl FeedSource for FileFeed {
    async fn fetch_events(&self) -> Result<Vec<RawActivityEvent>> {
        let started = Instant::now();
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading feed from {}", self.path.display()))?;
        let events = parse_events(&raw)?;
        histogram!("feed_parse_ms").record(started.elapsed().as_secs_f64() * 1000.0);
        Ok(events)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
