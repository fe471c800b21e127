use chrono::{Datelike, NaiveDate};
use hijri_date::HijriDate;
use serde::{Deserialize, Serialize};

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

const UNAVAILABLE: &str = "Hijri date unavailable";

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

/// "Friday, 14 Ramadan 1446" or a placeholder when out of the converter's range.
pub fn hijri_label(date: NaiveDate) -> String {
    match HijriDate::from_gr(
        date.year() as usize,
        date.month() as usize,
        date.day() as usize,
    ) {
        Ok(hd) => format!(
            "{}, {} {} {}",
            date.format("%A"),
            hd.day(),
            hijri_month_name(hd.month()),
            hd.year()
        ),
        Err(e) => {
            log::warn!("Hijri conversion failed for {}: {}", date, e);
            UNAVAILABLE.to_string()
        }
    }
}

/// "Monday, January 15, 2024"
pub fn gregorian_label(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

/// The date a daily schedule was built for, in both calendars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDate {
    pub gregorian: String,
    pub hijri: String,
}

impl ScheduleDate {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            gregorian: gregorian_label(date),
            hijri: hijri_label(date),
        }
    }
}
