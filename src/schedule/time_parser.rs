use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse `H:MM` or `HH:MM`. Anything else, including out-of-range fields, is `None`.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let (hour, minute) = s.split_once(':')?;
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Same as [`parse_time_of_day`], anchored to `date`.
pub fn parse_on(date: NaiveDate, s: &str) -> Option<NaiveDateTime> {
    parse_time_of_day(s).map(|t| date.and_time(t))
}

/// Minutes since midnight.
pub fn minutes_since_midnight(s: &str) -> Option<u32> {
    use chrono::Timelike;
    parse_time_of_day(s).map(|t| t.hour() * 60 + t.minute())
}
