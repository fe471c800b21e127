pub mod daily;
pub mod job;
pub mod prayer;
pub mod state;
pub mod year;

pub use daily::DailyPrayerValue;
pub use job::ScheduledJob;
pub use prayer::{PrayerKey, display_label};
pub use state::{ScheduleEntry, TemporalState};
pub use year::{DstTransition, YearData, YearDayRecord};
