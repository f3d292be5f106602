// src/activity/relative.rs
//! Human labels for the recent-activity list.

use chrono::{DateTime, TimeZone, Utc};

use super::summary::RecentActivity;

/// Coarse "how long ago" label: hours under a day, days under a month,
/// 30-day months beyond. Future timestamps read as "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - then).num_hours();
    if hours < 1 {
        return "just now".to_string();
    }
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days == 1 {
        return "yesterday".to_string();
    }
    if days < 30 {
        return format!("{days} days ago");
    }
    format!("{} months ago", days / 30)
}

/// Heading for the activity list: month and year of the newest entry in `tz`,
/// or "Recent" when there is nothing to show.
pub fn activity_month<Tz: TimeZone>(recent: &[RecentActivity], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match recent.first() {
        Some(entry) => entry.time.with_timezone(tz).format("%B %Y").to_string(),
        None => "Recent".to_string(),
    }
}
