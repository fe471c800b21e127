use serde::Serialize;

use crate::schedule::order::PrayerKeyed;

/// A prayer (or the reschedule marker) with the time to display today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub key: String,
    pub time: String,
}

impl ScheduleEntry {
    pub fn new(key: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            time: time.into(),
        }
    }
}

impl PrayerKeyed for ScheduleEntry {
    fn prayer_key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemporalState {
    pub passed: bool,
    pub is_next: bool,
    pub countdown: Option<String>,
}
