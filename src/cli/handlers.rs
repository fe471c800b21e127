use anyhow::{anyhow, Context, Result};
use chrono::Datelike;
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use crate::cli::args::{ImportCommands, JobCommands};
use crate::config::{AppConfig, DailyConfigStore, DailyConfigUpdate};
use crate::db::repository::{JobRepo, YearRepo};
use crate::models::{PrayerKey, ScheduledJob, YearData, display_label};
use crate::schedule::board::{build_rows, next_row};
use crate::schedule::calendar::{normalize_prayer_times, parse_timezone, year_from_calendar, MonthCalendar};
use crate::schedule::year::{build_chart, percent_to_hour_label, validate_year, AXIS_TICKS, SEGMENT_LABELS};
use crate::schedule::Clock;
use crate::utils::format::{format_last_run, format_time_12h, pad_display};
use crate::utils::hijri::ScheduleDate;
use crate::utils::joblog::{read_job_log, NO_LOGS};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

fn read_json<T: serde::de::DeserializeOwned>(file: &Path) -> Result<T> {
    let content = std::fs::read_to_string(file).with_context(|| format!("Reading {:?}", file))?;
    serde_json::from_str(&content).with_context(|| format!("Parsing {:?}", file))
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    conn: &Connection,
    store: &DailyConfigStore,
    config: &AppConfig,
    clock: &dyn Clock,
) -> Result<()> {
    let daily = store.load();
    let jobs = JobRepo::list(conn)?;
    let now = clock.now();
    let rows = build_rows(&daily, &jobs, now);

    println!();
    let mosque = daily.mosque.as_ref().map(|m| m.name.as_str()).unwrap_or("No mosque selected");
    println_colored!(GOLD, "  Prayer Times — {}", mosque);
    let date = daily
        .prayer_schedule_date
        .clone()
        .unwrap_or_else(|| ScheduleDate::for_date(now.date()));
    println_colored!(DIM, "  {}  ·  {}", date.gregorian, date.hijri);
    println!();

    if rows.is_empty() {
        println_colored!(AMBER, "  No prayer times available. Import a config first.");
        println!();
        return Ok(());
    }

    for row in &rows {
        let time = if config.display.clock_24h {
            row.time.clone()
        } else {
            format_time_12h(Some(&row.time))
        };
        let file = if row.has_file { "✓ file" } else { "⚠ no file" };
        let scheduled = if row.scheduled { "✓ scheduled" } else { "✗ not scheduled" };
        let volume = row
            .volume
            .map(|v| format!("vol {:.0}%", v * 100.0))
            .unwrap_or_default();
        let line = format!(
            "  {}  {:<9} {:<10} {:<16} {}",
            pad_display(&row.label, 20),
            time,
            file,
            scheduled,
            volume
        );
        if row.state.is_next {
            println_colored!(BOLD, "{}  ← next", line);
        } else if row.state.passed {
            println_colored!(DIM, "{}", line);
        } else {
            println!("{}", line);
        }
    }

    match next_row(&rows) {
        Some(next) => {
            println!();
            println_colored!(
                AMBER,
                "  Next: {} in {}",
                next.label,
                next.state.countdown.as_deref().unwrap_or_default()
            );
        }
        None => {
            println!();
            println_colored!(DIM, "  All prayers have passed for today");
        }
    }
    println!();
    Ok(())
}

// ─── Year ────────────────────────────────────────────────────────────────────

pub fn handle_year(
    conn: &Connection,
    config: &AppConfig,
    year: Option<i32>,
    clock: &dyn Clock,
) -> Result<()> {
    let today = clock.now().date();
    let year = year.unwrap_or(today.year());
    let Some(data) = YearRepo::load_or_file(conn, year, config.sources.year_data.as_deref())? else {
        println_colored!(AMBER, "  No data available for {}. Use `adhan import year` first.", year);
        return Ok(());
    };

    let chart = build_chart(&data, today);
    println!();
    println_colored!(GOLD, "  Prayer Times Throughout {}", chart.year);
    println!();

    if chart.rows.is_empty() {
        println_colored!(DIM, "  No data available for the chart");
        return Ok(());
    }

    let header: Vec<String> = SEGMENT_LABELS.iter().map(|l| format!("{:>15}", l)).collect();
    println_colored!(DIM, "  {:<12}{}", "Date", header.join(""));
    let mut last_month = None;
    for row in &chart.rows {
        let month = row.date.get(..7);
        if month == last_month {
            continue;
        }
        last_month = month;
        let cells: Vec<String> = row
            .segments
            .as_array()
            .iter()
            .map(|p| format!("{:>14.1}%", p))
            .collect();
        let dst = if row.is_dst { " DST" } else { "" };
        println!("  {:<12}{}{}", row.date, cells.join(""), dst);
    }

    println!();
    if let Some(day) = chart.today {
        println_colored!(GREEN, "  Today: day {}", day);
    }
    for t in &data.dst_transitions {
        println_colored!(RED, "  DST transition: day {} ({})", t.day_of_year, t.date);
    }
    let axis: Vec<String> = AXIS_TICKS.iter().map(|p| percent_to_hour_label(*p)).collect();
    println_colored!(DIM, "  Axis: {}", axis.join("  "));

    let problems = validate_year(&data.data);
    if !problems.is_empty() {
        println!();
        println_colored!(RED, "  {} day(s) with inconsistent times:", problems.len());
        for p in problems.iter().take(5) {
            log::warn!("{}", p);
            println_colored!(RED, "    {}", p);
        }
    }
    println!();
    Ok(())
}

// ─── Import ──────────────────────────────────────────────────────────────────

pub fn handle_import(
    conn: &mut Connection,
    store: &DailyConfigStore,
    config: &AppConfig,
    source: &ImportCommands,
    clock: &dyn Clock,
) -> Result<()> {
    match source {
        ImportCommands::Config { file } => {
            let update: DailyConfigUpdate = read_json(file)?;
            let daily = store.update(update)?;
            println_colored!(
                GREEN,
                "  ✓ Daily config updated ({} prayer times)",
                daily.prayer_times.len()
            );
        }
        ImportCommands::Year { file } => {
            let data: YearData = read_json(file)?;
            YearRepo::store_year(conn, &data)?;
            println_colored!(GREEN, "  ✓ Cached {} days for {}", data.data.len(), data.year);
        }
        ImportCommands::Calendar { file, year, today } => {
            let raw: serde_json::Value = read_json(file)?;
            let calendar: Vec<MonthCalendar> = raw
                .get("calendar")
                .cloned()
                .map(serde_json::from_value)
                .transpose()
                .context("Parsing calendar")?
                .ok_or_else(|| anyhow!("No calendar found in {:?}", file))?;
            let tz = parse_timezone(&config.display.timezone)?;
            let data = year_from_calendar(&calendar, *year, &tz);
            YearRepo::store_year(conn, &data)?;
            println_colored!(
                GREEN,
                "  ✓ Cached {} days for {} ({} DST transitions)",
                data.data.len(),
                year,
                data.dst_transitions.len()
            );

            if *today {
                let date = clock.now().date();
                let times = normalize_prayer_times(&raw, date);
                if times.is_empty() {
                    println_colored!(AMBER, "  No prayer times extracted for {}", date);
                } else {
                    store.update(DailyConfigUpdate {
                        prayer_times: Some(times),
                        prayer_schedule_date: Some(ScheduleDate::for_date(date)),
                        ..Default::default()
                    })?;
                    println_colored!(GREEN, "  ✓ Today's prayer times refreshed");
                }
            }
        }
        ImportCommands::Jobs { file } => {
            let jobs: Vec<ScheduledJob> = read_json(file)?;
            let keep: HashSet<&str> = jobs.iter().map(|j| j.prayer.as_str()).collect();
            for existing in JobRepo::list(conn)? {
                if !keep.contains(existing.prayer.as_str()) {
                    JobRepo::remove(conn, &existing.prayer)?;
                }
            }
            for job in &jobs {
                JobRepo::upsert(conn, job)?;
            }
            println_colored!(GREEN, "  ✓ {} scheduled job(s) imported", jobs.len());
        }
    }
    Ok(())
}

// ─── Jobs ────────────────────────────────────────────────────────────────────

pub fn handle_jobs(conn: &Connection, config: &AppConfig, action: &JobCommands) -> Result<()> {
    match action {
        JobCommands::List => {
            let jobs = JobRepo::list(conn)?;
            println!();
            if jobs.is_empty() {
                println_colored!(DIM, "  No scheduled jobs");
            } else {
                println_colored!(GOLD, "  Scheduled Jobs");
                println!();
                for job in &jobs {
                    println_colored!(BOLD, "  {}", display_label(&job.prayer));
                    println!(
                        "    Planned Time: {}",
                        format_time_12h(job.planned_time().as_deref())
                    );
                    if let Some(command) = &job.command {
                        println_colored!(DIM, "    Command:      {}", command);
                    }
                    println!("    Last Run:     {}", format_last_run(job.last_run.as_deref()));
                }
            }
            println!();
        }
        JobCommands::Remove { prayer } => {
            let key = canonical_key(prayer);
            if JobRepo::remove(conn, &key)? {
                println_colored!(GREEN, "  ✓ Job for {} removed", display_label(&key));
            } else {
                return Err(anyhow!("No scheduled job for '{}'", prayer));
            }
        }
        JobCommands::Logs { prayer, lines } => {
            let key = canonical_key(prayer);
            println!();
            println_colored!(GOLD, "  Logs for {}", display_label(&key));
            println!();
            match read_job_log(&config.sources.job_log_dir, &key, *lines)? {
                Some(text) if !text.is_empty() => println!("{}", text),
                _ => println_colored!(DIM, "  {}", NO_LOGS),
            }
            println!();
        }
    }
    Ok(())
}

fn canonical_key(prayer: &str) -> String {
    PrayerKey::from_str(prayer)
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|_| prayer.to_string())
}
