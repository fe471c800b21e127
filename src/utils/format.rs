use chrono::{DateTime, Local, NaiveDateTime};

use crate::schedule::time_parser::parse_time_of_day;

fn unit(n: i64, singular: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}s", n, singular)
    }
}

/// Countdown text for `secs` remaining; `None` when nothing remains.
///
/// "2 hrs 45 mins", "1 min 5 secs", "30 secs".
pub fn format_countdown(secs: i64) -> Option<String> {
    if secs <= 0 {
        return None;
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    Some(if hours > 0 {
        format!("{} {}", unit(hours, "hr"), unit(minutes, "min"))
    } else if minutes > 0 {
        format!("{} {}", unit(minutes, "min"), unit(seconds, "sec"))
    } else {
        unit(seconds, "sec")
    })
}

/// "HH:MM" as "h:MM AM/PM". Missing → "N/A", unparsable → unchanged.
pub fn format_time_12h(time: Option<&str>) -> String {
    use chrono::Timelike;
    let Some(raw) = time.filter(|t| !t.is_empty()) else {
        return "N/A".to_string();
    };
    match parse_time_of_day(raw) {
        Some(t) => {
            let (pm, hour) = t.hour12();
            format!("{}:{:02} {}", hour, t.minute(), if pm { "PM" } else { "AM" })
        }
        None => raw.to_string(),
    }
}

/// Last run of a job in local time, "Never" when it has not run.
pub fn format_last_run(last_run: Option<&str>) -> String {
    let Some(raw) = last_run.filter(|r| !r.is_empty()) else {
        return "Never".to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => "Unknown".to_string(),
    }
}

/// Pad to a display width, counting wide glyphs correctly.
pub fn pad_display(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}
