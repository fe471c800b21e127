use serde::{Deserialize, Serialize};

use crate::schedule::order::PrayerKeyed;

/// A playback job registered with the external scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub prayer: String,
    pub schedule: String,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub last_run: Option<String>,
}

impl ScheduledJob {
    /// Planned "HH:MM" derived from a daily cron expression (`M H * * *`).
    pub fn planned_time(&self) -> Option<String> {
        let mut fields = self.schedule.split_whitespace();
        let minute: u32 = fields.next()?.parse().ok()?;
        let hour: u32 = fields.next()?.parse().ok()?;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(format!("{:02}:{:02}", hour, minute))
    }
}

impl PrayerKeyed for ScheduledJob {
    fn prayer_key(&self) -> &str {
        &self.prayer
    }
}
