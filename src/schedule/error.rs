use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("day {day_of_year}: {prayer} time {value:?} is not HH:MM")]
    MalformedTime {
        day_of_year: u32,
        prayer: String,
        value: String,
    },

    #[error("day {day_of_year}: {later} is earlier than {earlier}")]
    NonMonotonic {
        day_of_year: u32,
        earlier: String,
        later: String,
    },

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}
