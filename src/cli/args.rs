use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adhan", version, author, about = "Terminal dashboard for a mosque-synced adhan schedule")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's prayer times and countdown to the next prayer
    Times,
    /// Show the year chart summary from the cached year data
    Year {
        /// Year to show (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Import snapshots produced by the sync service
    Import {
        #[command(subcommand)]
        source: ImportCommands,
    },
    /// Scheduled playback jobs
    Jobs {
        #[command(subcommand)]
        action: JobCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Merge a daily config JSON into the local snapshot
    Config {
        file: PathBuf,
    },
    /// Cache a year data JSON ({year, data, dstTransitions})
    Year {
        file: PathBuf,
    },
    /// Build and cache a year from a raw mosque API payload with a calendar
    Calendar {
        file: PathBuf,
        /// Year the calendar describes
        #[arg(long)]
        year: i32,
        /// Also refresh today's prayer times in the daily snapshot
        #[arg(long)]
        today: bool,
    },
    /// Replace the scheduled job list from JSON ([{prayer, schedule, last_run}])
    Jobs {
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// List scheduled jobs
    List,
    /// Remove the job for a prayer
    Remove {
        /// Prayer name (fajr, dhuhr, asr, maghrib, isha, reschedule)
        prayer: String,
    },
    /// Show the tail of a prayer's playback log
    Logs {
        prayer: String,
        /// Number of lines to show
        #[arg(long, default_value_t = 50)]
        lines: usize,
    },
}
