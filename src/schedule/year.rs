use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{YearData, YearDayRecord};
use crate::schedule::ScheduleError;
use crate::schedule::time_parser::minutes_since_midnight;

/// 23:59 is 100% of the chart's day.
pub const DAY_SPAN_MINUTES: f64 = 1439.0;

pub const SEGMENT_LABELS: [&str; 6] = [
    "Before Fajr",
    "Fajr to Dhuhr",
    "Dhuhr to Asr",
    "Asr to Maghrib",
    "Maghrib to Isha",
    "After Isha",
];

/// Stacked percentage-of-day intervals for one day. All zero for a day
/// whose times could not be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segments {
    pub before_fajr: f64,
    pub fajr_to_dhuhr: f64,
    pub dhuhr_to_asr: f64,
    pub asr_to_maghrib: f64,
    pub maghrib_to_isha: f64,
    pub after_isha: f64,
}

impl Segments {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.before_fajr,
            self.fajr_to_dhuhr,
            self.dhuhr_to_asr,
            self.asr_to_maghrib,
            self.maghrib_to_isha,
            self.after_isha,
        ]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub day_of_year: u32,
    pub date: String,
    pub gregorian: String,
    pub hijri: String,
    /// Source times, kept for tooltips.
    pub times: [String; 5],
    pub is_dst: bool,
    pub segments: Segments,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearChart {
    pub year: i32,
    pub rows: Vec<ChartRow>,
    /// Present only when the chart's year is the current one.
    pub today: Option<u32>,
    pub dst_days: Vec<u32>,
}

/// Percentages labelled on the chart's hour axis.
pub const AXIS_TICKS: [f64; 9] = [0.0, 12.5, 25.0, 37.5, 50.0, 62.5, 75.0, 87.5, 100.0];

pub fn minutes_to_percent(minutes: u32) -> f64 {
    minutes as f64 / DAY_SPAN_MINUTES * 100.0
}

/// Axis label for a percentage, e.g. 25.0 → "06h".
pub fn percent_to_hour_label(percent: f64) -> String {
    let minutes = percent / 100.0 * 1440.0;
    format!("{:02}h", (minutes / 60.0).floor() as i64)
}

fn day_percents(record: &YearDayRecord) -> Option<[f64; 5]> {
    let mut out = [0.0; 5];
    for (slot, (_, time)) in out.iter_mut().zip(record.times()) {
        *slot = minutes_to_percent(minutes_since_midnight(time)?);
    }
    Some(out)
}

/// Segments for one day; `None` if any of its times is unparsable.
///
/// Times are assumed to be non-decreasing fajr..isha. Out-of-order days yield
/// negative segments; see [`validate_day`].
pub fn segments_for(record: &YearDayRecord) -> Option<Segments> {
    let [fajr, dhuhr, asr, maghrib, isha] = day_percents(record)?;
    Some(Segments {
        before_fajr: fajr,
        fajr_to_dhuhr: dhuhr - fajr,
        dhuhr_to_asr: asr - dhuhr,
        asr_to_maghrib: maghrib - asr,
        maghrib_to_isha: isha - maghrib,
        after_isha: 100.0 - isha,
    })
}

/// One row per input day, in input order. Days with an unparsable time get
/// zeroed segments so the chart keeps one column per day.
pub fn transform(days: &[YearDayRecord]) -> Vec<ChartRow> {
    let rows: Vec<ChartRow> = days
        .iter()
        .map(|record| {
            let segments = segments_for(record).unwrap_or_else(|| {
                log::warn!(
                    "Day {} ({}) has an unparsable prayer time, leaving it empty",
                    record.day_of_year,
                    record.date
                );
                Segments::default()
            });
            ChartRow {
                day_of_year: record.day_of_year,
                date: record.date.clone(),
                gregorian: record.gregorian.clone(),
                hijri: record.hijri.clone(),
                times: record.times().map(|(_, t)| t.to_string()),
                is_dst: record.is_dst,
                segments,
            }
        })
        .collect();
    log::debug!("Transformed {} days", rows.len());
    rows
}

/// Chart rows plus the today and DST markers layered over them.
pub fn build_chart(year: &YearData, today: NaiveDate) -> YearChart {
    YearChart {
        year: year.year,
        rows: transform(&year.data),
        today: (today.year() == year.year).then(|| today.ordinal()),
        dst_days: year.dst_transitions.iter().map(|t| t.day_of_year).collect(),
    }
}

/// Check one day's times parse and run fajr <= dhuhr <= asr <= maghrib <= isha.
pub fn validate_day(record: &YearDayRecord) -> Result<(), ScheduleError> {
    let mut previous: Option<(&str, u32)> = None;
    for (prayer, time) in record.times() {
        let minutes =
            minutes_since_midnight(time).ok_or_else(|| ScheduleError::MalformedTime {
                day_of_year: record.day_of_year,
                prayer: prayer.to_string(),
                value: time.to_string(),
            })?;
        if let Some((earlier, prev_minutes)) = previous {
            if minutes < prev_minutes {
                return Err(ScheduleError::NonMonotonic {
                    day_of_year: record.day_of_year,
                    earlier: earlier.to_string(),
                    later: prayer.to_string(),
                });
            }
        }
        previous = Some((prayer, minutes));
    }
    Ok(())
}

/// Collect data-quality problems across a year.
pub fn validate_year(days: &[YearDayRecord]) -> Vec<ScheduleError> {
    days.iter().filter_map(|d| validate_day(d).err()).collect()
}
