pub mod board;
pub mod calendar;
pub mod clock;
pub mod engine;
pub mod error;
pub mod order;
pub mod resolver;
pub mod time_parser;
pub mod year;

pub use clock::{Clock, SystemClock};
pub use error::ScheduleError;
