//! # Contribution Synthesizer
//! Fabricates one calendar year of daily contribution counts for the heatmap
//! when no real contribution-calendar endpoint is available.
//!
//! Pure and deterministic: the only input is the caller-supplied `now`, and
//! every "random" draw is a trigonometric hash of the day's epoch millis.
//! The output is a visual placeholder, not history.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Months (0-indexed, January = 0) that get the seasonal boost.
const BOOSTED_MONTHS: [u32; 8] = [0, 1, 2, 5, 6, 7, 8, 9];

const WEEKEND_CHANCE: f64 = 0.4;
const WEEKDAY_CHANCE: f64 = 0.65;
const SEASON_BOOST: f64 = 0.1;

/// One generated calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// Calendar date in the generator's local zone, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub count: u32,
    /// Heat level 0..=4; zero iff `count` is zero.
    pub level: u8,
}

/// Generate the synthetic year ending at `now` (inclusive).
///
/// The range starts on the Sunday on or before the date one calendar year
/// before `now`, so the renderer can lay it out in full weeks. Dates are
/// strictly increasing with no gaps. The zone carried by `now` is the local
/// calendar for weekday/month decisions and for the per-day seed.
pub fn generate<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<DailyActivity> {
    let local = now.naive_local();
    let today = local.date();
    let time_of_day = local.time();
    let tz = now.timezone();

    let start = week_start(one_year_before(today));

    start
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|day| {
            let seed = local_epoch_millis(&tz, day.and_time(time_of_day));
            synthesize_day(day, seed)
        })
        .collect()
}

/// Deterministic value in `[0, 1)` derived from a millisecond timestamp.
///
/// `frac(sin(seed / 86_400_000) * 10_000)`. The formula is part of the
/// contract: golden outputs depend on it, so it must not be swapped for a
/// real PRNG.
pub fn seeded_random(seed: i64) -> f64 {
    let x = (seed as f64 / MILLIS_PER_DAY).sin() * 10_000.0;
    x - x.floor()
}

/// Probability threshold for a day to carry any activity.
///
/// Weekdays (Mon–Fri) start at 0.65, weekends at 0.4; boosted months add 0.1
/// on top. Values above 1.0 are allowed and simply make the day certain.
pub fn base_chance(day: NaiveDate) -> f64 {
    let weekday = day.weekday().num_days_from_sunday();
    let mut chance = if (1..=5).contains(&weekday) {
        WEEKDAY_CHANCE
    } else {
        WEEKEND_CHANCE
    };
    if BOOSTED_MONTHS.contains(&day.month0()) {
        chance += SEASON_BOOST;
    }
    chance
}

/// Map an intensity draw in `[0, 1)` to `(count, level)`.
pub fn bucket_for(intensity: f64) -> (u32, u8) {
    if intensity < 0.35 {
        ((intensity * 5.0).floor() as u32 + 1, 1)
    } else if intensity < 0.60 {
        ((intensity * 8.0).floor() as u32 + 3, 2)
    } else if intensity < 0.85 {
        ((intensity * 12.0).floor() as u32 + 5, 3)
    } else {
        ((intensity * 20.0).floor() as u32 + 10, 4)
    }
}

/// Counts a level can produce, given intensity draws in `[0, 1)`.
pub fn count_bounds(level: u8) -> RangeInclusive<u32> {
    match level {
        0 => 0..=0,
        1 => 1..=2,
        2 => 5..=7,
        3 => 12..=15,
        _ => 27..=29,
    }
}

fn synthesize_day(day: NaiveDate, seed: i64) -> DailyActivity {
    let occurs = seeded_random(seed);
    let (count, level) = if occurs < base_chance(day) {
        bucket_for(seeded_random(seed + 1))
    } else {
        (0, 0)
    };
    DailyActivity { date: day, count, level }
}

fn one_year_before(day: NaiveDate) -> NaiveDate {
    let year = day.year() - 1;
    // Feb 29 has no counterpart in the previous year; roll forward to Mar 1.
    day.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(day)
}

fn week_start(day: NaiveDate) -> NaiveDate {
    let back = u64::from(day.weekday().num_days_from_sunday());
    day.checked_sub_days(Days::new(back)).unwrap_or(day)
}

/// Epoch millis of a local wall-clock time in `tz`.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times inside a
/// DST gap are pushed forward one hour.
fn local_epoch_millis<Tz: TimeZone>(tz: &Tz, wall: NaiveDateTime) -> i64 {
    tz.from_local_datetime(&wall)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(wall + Duration::hours(1))).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| wall.and_utc().timestamp_millis())
}
