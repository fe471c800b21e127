pub mod header;
pub mod jobs;
pub mod next_prayer;
pub mod prayers;
pub mod statusbar;
pub mod year_chart;
