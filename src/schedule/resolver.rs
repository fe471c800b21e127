use indexmap::IndexMap;

use crate::models::{DailyPrayerValue, ScheduleEntry};

pub const NOT_AVAILABLE: &str = "N/A";

impl DailyPrayerValue {
    /// The value to show on day-of-month `today`.
    ///
    /// A day-keyed value missing `today` falls back to its first entry in
    /// source order, not the nearest day.
    pub fn resolve(&self, today: u32) -> &str {
        match self {
            DailyPrayerValue::Fixed(s) => s,
            DailyPrayerValue::ByDay(days) => days
                .iter()
                .find(|(day, _)| *day == today)
                .or_else(|| days.first())
                .map(|(_, time)| time.as_str())
                .unwrap_or(NOT_AVAILABLE),
        }
    }
}

/// Resolve every present prayer for `today`; absent (`None`) prayers are skipped.
pub fn resolve_all(
    prayer_times: &IndexMap<String, Option<DailyPrayerValue>>,
    today: u32,
) -> Vec<ScheduleEntry> {
    prayer_times
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| ScheduleEntry::new(key.as_str(), v.resolve(today)))
        })
        .collect()
}
