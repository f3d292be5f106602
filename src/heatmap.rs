//! Heatmap grid: regroups a flat day sequence into week × weekday cells for
//! the calendar chart, plus the month labels along the week axis.
//!
//! Relies on the synthesizer's ordering (strictly increasing dates, no gaps).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::contributions::DailyActivity;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatCell {
    pub week: u32,
    /// Sunday = 0.
    pub weekday: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub cells: Vec<HeatCell>,
    pub weeks: u32,
    /// One entry per week; month name where a month starts, empty otherwise.
    pub x_labels: Vec<String>,
    #[serde(skip)]
    days: Vec<DailyActivity>,
}

impl HeatmapGrid {
    pub fn from_days(days: &[DailyActivity]) -> Self {
        let Some(first) = days.first().map(|d| d.date) else {
            return Self {
                cells: Vec::new(),
                weeks: 0,
                x_labels: Vec::new(),
                days: Vec::new(),
            };
        };

        let cells: Vec<HeatCell> = days
            .iter()
            .map(|d| HeatCell {
                week: week_index(first, d.date),
                weekday: d.date.weekday().num_days_from_sunday(),
                count: d.count,
            })
            .collect();

        let weeks = cells.iter().map(|c| c.week).max().unwrap_or(0) + 1;

        let mut x_labels = vec![String::new(); weeks as usize];
        let mut last_month = None;
        for d in days {
            let month = d.date.month0();
            if d.date.weekday().num_days_from_sunday() == 0 && last_month != Some(month) {
                if let Some(slot) = x_labels.get_mut(week_index(first, d.date) as usize) {
                    *slot = MONTH_LABELS[month as usize].to_string();
                }
                last_month = Some(month);
            }
        }

        Self {
            cells,
            weeks,
            x_labels,
            days: days.to_vec(),
        }
    }

    /// Day shown at a grid position (tooltip lookup).
    pub fn day_at(&self, week: u32, weekday: u32) -> Option<&DailyActivity> {
        if weekday > 6 {
            return None;
        }
        let idx = week as usize * 7 + weekday as usize;
        self.days.get(idx)
    }
}

fn week_index(first: NaiveDate, date: NaiveDate) -> u32 {
    let diff = (date - first).num_days().max(0);
    (diff / 7) as u32
}
