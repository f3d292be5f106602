// src/activity/mod.rs
pub mod event;
pub mod relative;
pub mod summary;

pub use event::{EventDetail, RawActivityEvent};
pub use relative::{activity_month, time_ago};
pub use summary::{summarize, ActivityCounters, ActivityKind, ActivitySummary, RecentActivity};
