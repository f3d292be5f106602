// src/config/app.rs
use anyhow::{anyhow, bail, Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_CONFIG_PATH: &str = "config/pulse.toml";
pub const ENV_CONFIG_PATH: &str = "PULSE_CONFIG_PATH";
pub const ENV_UTC_OFFSET_MINUTES: &str = "PULSE_UTC_OFFSET_MINUTES";
pub const ENV_FEED_PATH: &str = "PULSE_FEED_PATH";

const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

fn default_feed_path() -> PathBuf {
    PathBuf::from("config/events.json")
}
fn default_refresh_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Offset of the dashboard's local calendar from UTC.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// JSON array of upstream activity events.
    #[serde(default = "default_feed_path")]
    pub path: PathBuf,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: default_feed_path(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML file, then apply env overrides and validate.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.finish()
    }

    /// Resolve the config file:
    /// 1) $PULSE_CONFIG_PATH (must exist)
    /// 2) config/pulse.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                bail!("{ENV_CONFIG_PATH} points to non-existent path {}", pb.display());
            }
            return Self::load_from_file(&pb);
        }
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::load_from_file(&default);
        }
        Self::default().finish()
    }

    fn finish(mut self) -> Result<Self> {
        if let Ok(raw) = env::var(ENV_UTC_OFFSET_MINUTES) {
            self.calendar.utc_offset_minutes = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_UTC_OFFSET_MINUTES}={raw:?} is not an integer"))?;
        }
        if let Ok(p) = env::var(ENV_FEED_PATH) {
            if !p.trim().is_empty() {
                self.feed.path = PathBuf::from(p.trim());
            }
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        let m = self.calendar.utc_offset_minutes;
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&m) {
            bail!("calendar.utc_offset_minutes out of range: {m}");
        }
        if self.feed.refresh_secs == 0 {
            bail!("feed.refresh_secs must be at least 1");
        }
        Ok(())
    }

    /// Zone used as the local calendar for the contribution year.
    pub fn calendar_offset(&self) -> Result<FixedOffset> {
        let m = self.calendar.utc_offset_minutes;
        FixedOffset::east_opt(m * 60).ok_or_else(|| anyhow!("invalid UTC offset: {m} minutes"))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.feed.refresh_secs)
    }
}
