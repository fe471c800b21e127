mod cli;
mod config;
mod db;
mod models;
mod schedule;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::{AppConfig, DailyConfigStore};
use db::migrations::run_migrations;
use schedule::SystemClock;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let mut conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;

    let store = DailyConfigStore::new(config.daily_config_path()?);
    let clock = SystemClock;

    match cli.command {
        Some(Commands::Times) => {
            handlers::handle_times(&conn, &store, &config, &clock)?;
        }
        Some(Commands::Year { year }) => {
            handlers::handle_year(&conn, &config, year, &clock)?;
        }
        Some(Commands::Import { source }) => {
            handlers::handle_import(&mut conn, &store, &config, &source, &clock)?;
        }
        Some(Commands::Jobs { action }) => {
            handlers::handle_jobs(&conn, &config, &action)?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(conn, store, config, Box::new(clock))?;
        }
    }

    Ok(())
}
