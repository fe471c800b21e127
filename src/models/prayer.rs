use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerKey {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    /// Not a prayer: the daily job that refreshes the rest of the schedule.
    Reschedule,
}

impl PrayerKey {
    /// The five daily prayers in canonical order.
    pub const DAILY: [PrayerKey; 5] = [
        PrayerKey::Fajr,
        PrayerKey::Dhuhr,
        PrayerKey::Asr,
        PrayerKey::Maghrib,
        PrayerKey::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerKey::Fajr => "fajr",
            PrayerKey::Dhuhr => "dhuhr",
            PrayerKey::Asr => "asr",
            PrayerKey::Maghrib => "maghrib",
            PrayerKey::Isha => "isha",
            PrayerKey::Reschedule => "reschedule",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerKey::Fajr => "Fajr",
            PrayerKey::Dhuhr => "Dhuhr",
            PrayerKey::Asr => "Asr",
            PrayerKey::Maghrib => "Maghrib",
            PrayerKey::Isha => "Isha",
            PrayerKey::Reschedule => "Reschedule Prayers",
        }
    }

    pub fn is_reschedule(&self) -> bool {
        matches!(self, PrayerKey::Reschedule)
    }
}

impl std::fmt::Display for PrayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fajr" => Ok(PrayerKey::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerKey::Dhuhr),
            "asr" => Ok(PrayerKey::Asr),
            "maghrib" => Ok(PrayerKey::Maghrib),
            "isha" => Ok(PrayerKey::Isha),
            "reschedule" => Ok(PrayerKey::Reschedule),
            _ => Err(anyhow::anyhow!("Unknown prayer: {}", s)),
        }
    }
}

/// Display label for any schedule key, known or not.
pub fn display_label(key: &str) -> String {
    key.parse::<PrayerKey>()
        .map(|p| p.display_name().to_string())
        .unwrap_or_else(|_| key.to_string())
}
