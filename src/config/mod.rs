pub mod daily;
pub mod settings;

pub use daily::{DailyConfig, DailyConfigStore, DailyConfigUpdate};
pub use settings::AppConfig;
