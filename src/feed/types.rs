// src/feed/types.rs
use anyhow::Result;

use crate::activity::RawActivityEvent;

/// Producer of the raw activity feed, newest-first.
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<RawActivityEvent>>;
    fn name(&self) -> &'static str;
}

/// In-memory feed (tests, demos).
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    events: Vec<RawActivityEvent>,
}

impl StaticFeed {
    pub fn new(events: Vec<RawActivityEvent>) -> Self {
        Self { events }
    }
}

#[async_trait::async_trait]
impl FeedSource for StaticFeed {
    async fn fetch_events(&self) -> Result<Vec<RawActivityEvent>> {
        Ok(self.events.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
