//! Normalization of the upstream timetable formats.
//!
//! The mosque API may send a `calendar`: twelve month objects keyed `"1"`..`"31"`,
//! each day an array `[fajr, shuruq, dhuhr, asr, maghrib, isha]`. Older payloads
//! carry per-prayer strings, day-keyed objects or a five-element list instead.

use chrono::{Datelike, NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde_json::Value;

use crate::models::{DailyPrayerValue, DstTransition, PrayerKey, YearData, YearDayRecord};
use crate::schedule::ScheduleError;
use crate::utils::hijri::{gregorian_label, hijri_label};

pub type MonthCalendar = IndexMap<String, Vec<String>>;

/// Positions of the five prayers in a calendar day array; index 1 is shuruq.
const CALENDAR_SLOTS: [(PrayerKey, usize); 5] = [
    (PrayerKey::Fajr, 0),
    (PrayerKey::Dhuhr, 2),
    (PrayerKey::Asr, 3),
    (PrayerKey::Maghrib, 4),
    (PrayerKey::Isha, 5),
];

fn calendar_day<'a>(calendar: &'a [MonthCalendar], date: NaiveDate) -> Option<&'a [String]> {
    let month = calendar.get(date.month0() as usize)?;
    let times = month.get(&date.day().to_string())?;
    (times.len() >= 6).then_some(times.as_slice())
}

/// The five prayer times of `date`; empty when the calendar lacks that day.
pub fn times_from_calendar(calendar: &[MonthCalendar], date: NaiveDate) -> IndexMap<String, String> {
    let Some(times) = calendar_day(calendar, date) else {
        return IndexMap::new();
    };
    CALENDAR_SLOTS
        .iter()
        .map(|(prayer, idx)| (prayer.as_str().to_string(), times[*idx].clone()))
        .collect()
}

fn parse_calendar(raw: &Value) -> Option<Vec<MonthCalendar>> {
    let calendar = raw.get("calendar")?;
    if calendar.as_array().is_none_or(|a| a.is_empty()) {
        return None;
    }
    match serde_json::from_value(calendar.clone()) {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("Ignoring malformed calendar: {}", e);
            None
        }
    }
}

/// Turn a raw API payload into per-prayer values for `date`.
///
/// The calendar wins when it has `date`; otherwise each remaining key is kept
/// as a fixed time, a day-keyed value, or expanded from a five-element list.
pub fn normalize_prayer_times(
    raw: &Value,
    date: NaiveDate,
) -> IndexMap<String, Option<DailyPrayerValue>> {
    if let Some(calendar) = parse_calendar(raw) {
        let times = times_from_calendar(&calendar, date);
        if !times.is_empty() {
            return times
                .into_iter()
                .map(|(k, t)| (k, Some(DailyPrayerValue::Fixed(t))))
                .collect();
        }
    }

    let mut out = IndexMap::new();
    let Some(object) = raw.as_object() else {
        return out;
    };
    for (key, value) in object {
        if key == "calendar" {
            continue;
        }
        match value {
            Value::String(s) => {
                out.insert(key.clone(), Some(DailyPrayerValue::Fixed(s.clone())));
            }
            Value::Object(_) => {
                let parsed = serde_json::from_value::<DailyPrayerValue>(value.clone())
                    .map_err(|e| log::warn!("Ignoring {}: {}", key, e))
                    .ok();
                out.insert(key.clone(), parsed);
            }
            Value::Array(items) if !items.is_empty() => {
                for (prayer, item) in PrayerKey::DAILY.iter().zip(items) {
                    let time = item.as_str().map(|s| DailyPrayerValue::Fixed(s.to_string()));
                    out.insert(prayer.as_str().to_string(), time);
                }
            }
            _ => {
                out.insert(key.clone(), None);
            }
        }
    }
    out
}

pub fn parse_timezone(name: &str) -> Result<Tz, ScheduleError> {
    name.parse::<Tz>()
        .map_err(|_| ScheduleError::UnknownTimezone(name.to_string()))
}

fn noon_offset_secs<T: TimeZone>(tz: &T, date: NaiveDate) -> Option<i32> {
    let noon = date.and_hms_opt(12, 0, 0)?;
    tz.offset_from_local_datetime(&noon)
        .earliest()
        .map(|o| o.fix().local_minus_utc())
}

/// Whether summer time is in effect at local noon on `date`.
///
/// Standard time is the smaller of the January and July offsets, which also
/// holds south of the equator.
pub fn is_dst<T: TimeZone>(tz: &T, date: NaiveDate) -> bool {
    let year = date.year();
    let standard = [(1, 1), (7, 1)]
        .iter()
        .filter_map(|(m, d)| NaiveDate::from_ymd_opt(year, *m, *d))
        .filter_map(|day| noon_offset_secs(tz, day))
        .min();
    match (standard, noon_offset_secs(tz, date)) {
        (Some(std), Some(current)) => current > std,
        _ => false,
    }
}

/// Assemble a year of chart input from the calendar.
///
/// Days missing from the calendar are left out. DST transitions are computed
/// over every date of the year, independent of calendar coverage.
pub fn year_from_calendar<T: TimeZone>(calendar: &[MonthCalendar], year: i32, tz: &T) -> YearData {
    let mut data = Vec::new();
    let mut dst_transitions = Vec::new();
    let mut previous_dst: Option<bool> = None;

    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return YearData { year, data, dst_transitions };
    };

    for date in first.iter_days().take_while(|d| d.year() == year) {
        let dst = is_dst(tz, date);
        if previous_dst.is_some_and(|prev| prev != dst) {
            dst_transitions.push(DstTransition {
                day_of_year: date.ordinal(),
                date: date.format("%Y-%m-%d").to_string(),
            });
        }
        previous_dst = Some(dst);

        let Some(times) = calendar_day(calendar, date) else {
            log::debug!("No calendar entry for {}", date);
            continue;
        };
        data.push(YearDayRecord {
            day_of_year: date.ordinal(),
            date: date.format("%Y-%m-%d").to_string(),
            fajr: times[0].clone(),
            dhuhr: times[2].clone(),
            asr: times[3].clone(),
            maghrib: times[4].clone(),
            isha: times[5].clone(),
            is_dst: dst,
            gregorian: gregorian_label(date),
            hijri: hijri_label(date),
        });
    }

    log::info!(
        "Built {} days for {} with {} DST transitions",
        data.len(),
        year,
        dst_transitions.len()
    );
    YearData { year, data, dst_transitions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(fajr: &str) -> Vec<String> {
        [fajr, "07:00", "12:30", "15:45", "18:20", "19:50"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn calendar() -> Vec<MonthCalendar> {
        (1..=12)
            .map(|_| {
                let mut month = MonthCalendar::new();
                month.insert("1".into(), day("05:01"));
                month.insert("15".into(), day("05:15"));
                month.insert("16".into(), vec!["05:16".into()]);
                month
            })
            .collect()
    }

    #[test]
    fn extracts_five_prayers_without_shuruq() {
        let times = times_from_calendar(&calendar(), date(2025, 3, 15));
        let keys: Vec<&str> = times.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["fajr", "dhuhr", "asr", "maghrib", "isha"]);
        assert_eq!(times["fajr"], "05:15");
        assert_eq!(times["dhuhr"], "12:30");
    }

    #[test]
    fn missing_or_short_days_are_empty() {
        assert!(times_from_calendar(&calendar(), date(2025, 3, 2)).is_empty());
        assert!(times_from_calendar(&calendar(), date(2025, 3, 16)).is_empty());
        assert!(times_from_calendar(&[], date(2025, 3, 1)).is_empty());
    }

    #[test]
    fn calendar_takes_precedence() {
        let raw = json!({
            "fajr": "04:00",
            "calendar": calendar(),
        });
        let times = normalize_prayer_times(&raw, date(2025, 6, 1));
        assert_eq!(times["fajr"], Some(DailyPrayerValue::Fixed("05:01".into())));
        assert_eq!(times.len(), 5);
    }

    #[test]
    fn falls_back_to_per_key_values() {
        let raw = json!({
            "calendar": [],
            "fajr": "05:00",
            "dhuhr": {"1": "12:30", "2": "12:31"},
            "asr": null,
        });
        let times = normalize_prayer_times(&raw, date(2025, 6, 2));
        assert_eq!(times["fajr"], Some(DailyPrayerValue::Fixed("05:00".into())));
        assert_eq!(
            times["dhuhr"],
            Some(DailyPrayerValue::by_day([(1, "12:30"), (2, "12:31")]))
        );
        assert_eq!(times["asr"], None);
        assert!(!times.contains_key("calendar"));
    }

    #[test]
    fn expands_time_lists() {
        let raw = json!({"times": ["05:00", "12:30", "15:45", "18:20", "19:50"]});
        let times = normalize_prayer_times(&raw, date(2025, 6, 2));
        assert_eq!(times["isha"], Some(DailyPrayerValue::Fixed("19:50".into())));
        assert!(!times.contains_key("times"));
    }

    #[test]
    fn detects_european_summer_time() {
        let paris = parse_timezone("Europe/Paris").unwrap();
        assert!(!is_dst(&paris, date(2025, 1, 15)));
        assert!(is_dst(&paris, date(2025, 7, 15)));
        assert!(is_dst(&paris, date(2025, 3, 30)));
        assert!(!is_dst(&paris, date(2025, 10, 26)));
    }

    #[test]
    fn southern_hemisphere_summer_time() {
        let sydney = parse_timezone("Australia/Sydney").unwrap();
        assert!(is_dst(&sydney, date(2025, 1, 15)));
        assert!(!is_dst(&sydney, date(2025, 7, 15)));
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(ScheduleError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn builds_year_with_transitions() {
        let paris = parse_timezone("Europe/Paris").unwrap();
        let year = year_from_calendar(&calendar(), 2025, &paris);
        // days 1 and 15 of each month have full entries
        assert_eq!(year.data.len(), 24);
        let days: Vec<u32> = year.dst_transitions.iter().map(|t| t.day_of_year).collect();
        assert_eq!(days, vec![89, 299]);
        assert_eq!(year.dst_transitions[0].date, "2025-03-30");
        let july = year.data.iter().find(|d| d.date == "2025-07-01").unwrap();
        assert!(july.is_dst);
        assert_eq!(july.day_of_year, 182);
        assert_eq!(july.gregorian, "Tuesday, July 01, 2025");
    }

    #[test]
    fn fixed_offset_has_no_transitions() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let year = year_from_calendar(&calendar(), 2024, &utc);
        assert!(year.dst_transitions.is_empty());
        assert!(year.data.iter().all(|d| !d.is_dst));
    }
}
