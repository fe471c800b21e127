use chrono::{Datelike, NaiveDateTime};

use crate::config::DailyConfig;
use crate::models::{ScheduleEntry, ScheduledJob, TemporalState, display_label};
use crate::schedule::engine::evaluate;
use crate::schedule::order::sorted_by_prayer_order;
use crate::schedule::resolver::resolve_all;

/// One line of the daily board: resolved time, live state and annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerRow {
    pub key: String,
    pub label: String,
    pub time: String,
    pub state: TemporalState,
    pub has_file: bool,
    pub volume: Option<f64>,
    pub scheduled: bool,
}

/// Resolve, order and classify today's prayers from a config snapshot.
pub fn build_rows(config: &DailyConfig, jobs: &[ScheduledJob], now: NaiveDateTime) -> Vec<PrayerRow> {
    let entries: Vec<ScheduleEntry> =
        sorted_by_prayer_order(resolve_all(&config.prayer_times, now.day()));
    let mut states = evaluate(&entries, now);

    entries
        .into_iter()
        .map(|entry| {
            let state = states.swap_remove(&entry.key).unwrap_or_default();
            PrayerRow {
                label: display_label(&entry.key),
                has_file: config.has_file(&entry.key),
                volume: config.volume(&entry.key),
                scheduled: jobs.iter().any(|j| j.prayer == entry.key),
                key: entry.key,
                time: entry.time,
                state,
            }
        })
        .collect()
}

pub fn next_row(rows: &[PrayerRow]) -> Option<&PrayerRow> {
    rows.iter().find(|r| r.state.is_next)
}
