use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::config::{AppConfig, DailyConfig, DailyConfigStore};
use crate::db::repository::{JobRepo, YearRepo};
use crate::models::{display_label, ScheduledJob};
use crate::schedule::board::{build_rows, next_row, PrayerRow};
use crate::schedule::year::{build_chart, YearChart, SEGMENT_LABELS};
use crate::schedule::Clock;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{header, jobs, next_prayer, prayers, statusbar, year_chart};
use crate::utils::hijri::ScheduleDate;
use crate::utils::joblog::{read_job_log, NO_LOGS};

const LOG_TAIL_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Year,
    Help,
    Logs,
}

pub struct App {
    pub view: View,
    /// View to return to when help closes.
    pub previous_view: View,
    pub config: AppConfig,
    pub store: DailyConfigStore,
    pub clock: Box<dyn Clock>,
    pub focus_idx: usize,
    pub should_quit: bool,
    pub status: Option<String>,

    // Cached state (refreshed on tick/action)
    pub today: NaiveDate,
    pub daily: DailyConfig,
    pub jobs: Vec<ScheduledJob>,
    pub rows: Vec<PrayerRow>,
    pub chart_year: i32,
    pub chart: Option<YearChart>,
    /// Label and log tail of the job shown in the logs view.
    pub job_log: Option<(String, String)>,
}

impl App {
    pub fn new(config: AppConfig, store: DailyConfigStore, clock: Box<dyn Clock>) -> Self {
        let today = clock.now().date();
        App {
            view: View::Dashboard,
            previous_view: View::Dashboard,
            config,
            store,
            clock,
            focus_idx: 0,
            should_quit: false,
            status: None,
            today,
            daily: DailyConfig::default(),
            jobs: Vec::new(),
            rows: Vec::new(),
            chart_year: today.year(),
            chart: None,
            job_log: None,
        }
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        self.today = self.clock.now().date();
        self.daily = self.store.load();
        self.jobs = JobRepo::list(conn)?;
        self.focus_idx = self.focus_idx.min(self.jobs.len().saturating_sub(1));
        self.load_chart(conn)?;
        self.refresh_rows();
        Ok(())
    }

    fn load_chart(&mut self, conn: &Connection) -> Result<()> {
        let fallback = self.config.sources.year_data.as_deref();
        self.chart = YearRepo::load_or_file(conn, self.chart_year, fallback)?
            .map(|data| build_chart(&data, self.today));
        Ok(())
    }

    fn refresh_rows(&mut self) {
        self.rows = build_rows(&self.daily, &self.jobs, self.clock.now());
    }

    /// Re-evaluate prayer states; reload everything once the date rolls over.
    pub fn tick(&mut self, conn: &Connection) {
        let now = self.clock.now().date();
        if now != self.today {
            log::info!("Date changed, reloading");
            if now.year() != self.today.year() {
                self.chart_year = now.year();
            }
            if let Err(e) = self.load(conn) {
                log::error!("Reload failed: {:#}", e);
                self.status = Some(format!("Reload failed: {}", e));
            }
            return;
        }
        self.refresh_rows();
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Only handle actual key presses; some terminals also send release/repeat
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status = None;
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key, conn),
            View::Year => self.handle_year_key(key, conn),
            View::Help => self.handle_help_key(key),
            View::Logs => self.handle_logs_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => self.open_help(),
            KeyCode::Char('y') => {
                self.view = View::Year;
            }
            KeyCode::Char('r') => match self.load(conn) {
                Ok(()) => self.status = Some("Reloaded".to_string()),
                Err(e) => self.status = Some(format!("Reload failed: {}", e)),
            },
            KeyCode::Up => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.focus_idx + 1 < self.jobs.len() {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Char('x') => self.remove_focused_job(conn),
            KeyCode::Char('l') => self.open_focused_log(),
            _ => {}
        }
    }

    fn handle_year_key(&mut self, key: KeyEvent, conn: &Connection) {
        let step = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('y') => {
                self.view = View::Dashboard;
                return;
            }
            KeyCode::Char('?') => {
                self.open_help();
                return;
            }
            KeyCode::Left => -1,
            KeyCode::Right => 1,
            _ => return,
        };
        self.chart_year += step;
        if let Err(e) = self.load_chart(conn) {
            log::error!("Loading year {} failed: {:#}", self.chart_year, e);
            self.status = Some(format!("Loading year failed: {}", e));
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            self.view = self.previous_view;
        }
    }

    fn handle_logs_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('l')) {
            self.job_log = None;
            self.view = View::Dashboard;
        }
    }

    fn open_focused_log(&mut self) {
        let Some(job) = self.jobs.get(self.focus_idx) else {
            return;
        };
        let label = display_label(&job.prayer);
        match read_job_log(&self.config.sources.job_log_dir, &job.prayer, LOG_TAIL_LINES) {
            Ok(text) => {
                let text = text.filter(|t| !t.is_empty()).unwrap_or_else(|| NO_LOGS.to_string());
                self.job_log = Some((label, text));
                self.view = View::Logs;
            }
            Err(e) => {
                log::error!("Reading log for {} failed: {:#}", job.prayer, e);
                self.status = Some(format!("Reading log failed: {}", e));
            }
        }
    }

    fn open_help(&mut self) {
        self.previous_view = self.view;
        self.view = View::Help;
    }

    fn remove_focused_job(&mut self, conn: &Connection) {
        let Some(job) = self.jobs.get(self.focus_idx) else {
            return;
        };
        let prayer = job.prayer.clone();
        match JobRepo::remove(conn, &prayer) {
            Ok(true) => {
                log::info!("Removed job for {}", prayer);
                self.status = Some(format!("Removed job for {}", prayer));
                if let Err(e) = self.load(conn) {
                    self.status = Some(format!("Reload failed: {}", e));
                }
            }
            Ok(false) => self.status = Some(format!("No job for {}", prayer)),
            Err(e) => {
                log::error!("Removing job for {} failed: {:#}", prayer, e);
                self.status = Some(format!("Remove failed: {}", e));
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Year => self.draw_year(frame),
            View::Help => {
                match self.previous_view {
                    View::Year => self.draw_year(frame),
                    _ => self.draw_dashboard(frame),
                }
                self.draw_help_overlay(frame);
            }
            View::Logs => {
                self.draw_dashboard(frame);
                self.draw_logs_overlay(frame);
            }
        }
    }

    fn layout(&self, frame: &mut Frame, year_view: bool) -> Rect {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let date = self
            .daily
            .prayer_schedule_date
            .clone()
            .unwrap_or_else(|| ScheduleDate::for_date(self.today));
        header::render(
            frame,
            outer_chunks[0],
            &date,
            self.daily.mosque.as_ref().map(|m| m.name.as_str()),
            self.daily.chromecast.as_ref().map(|d| d.name.as_str()),
        );
        statusbar::render(frame, outer_chunks[2], year_view, self.status.as_deref());
        outer_chunks[1]
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let body = self.layout(frame, false);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body);

        prayers::render(frame, columns[0], &self.rows, self.config.display.clock_24h);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8), // next prayer
                Constraint::Min(0),    // jobs
            ])
            .split(columns[1]);

        next_prayer::render(frame, right_chunks[0], next_row(&self.rows));
        jobs::render(frame, right_chunks[1], &self.jobs, self.focus_idx, true);
    }

    fn draw_year(&self, frame: &mut Frame) {
        let body = self.layout(frame, true);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(body);

        match &self.chart {
            Some(chart) => year_chart::render(frame, chunks[0], Some(chart)),
            None => {
                let block = Block::default()
                    .title(Span::styled(
                        format!(" Prayer Times Throughout {} ", self.chart_year),
                        theme::gold(),
                    ))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border(false))
                    .style(theme::surface());
                let msg = Paragraph::new(Span::styled(
                    format!("  No data available for {}", self.chart_year),
                    theme::dim(),
                ))
                .block(block);
                frame.render_widget(msg, chunks[0]);
            }
        }

        let mut legend: Vec<Span> = SEGMENT_LABELS
            .iter()
            .zip(theme::SEGMENTS)
            .flat_map(|(label, color)| {
                [
                    Span::styled("  ■ ", Style::default().fg(color)),
                    Span::styled(*label, theme::dim()),
                ]
            })
            .collect();
        legend.push(Span::styled("  │ today", Style::default().fg(theme::TODAY)));
        legend.push(Span::styled("  ┊ DST", Style::default().fg(theme::DST)));
        frame.render_widget(Paragraph::new(Line::from(legend)), chunks[1]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        // Center a help box
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [y]          ", "Toggle year view"),
            ("  [← →]        ", "Previous / next year"),
            ("  [r]          ", "Reload config and jobs"),
            ("  [↑ ↓]        ", "Navigate jobs"),
            ("  [x]          ", "Remove focused job"),
            ("  [l]          ", "Show focused job's log"),
            ("  [?]          ", "Toggle help"),
            ("  [Esc]        ", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        help_text.extend(bindings.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(*key, theme::gold()),
                Span::styled(*action, theme::dim()),
            ])
        }));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_logs_overlay(&self, frame: &mut Frame) {
        let Some((label, text)) = &self.job_log else {
            return;
        };
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 10,
            y: area.height / 10,
            width: area.width * 4 / 5,
            height: area.height * 4 / 5,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(Span::styled(format!(" Logs for {} ", label), theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        // keep the newest lines in view
        let visible = popup_area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = text.lines().map(|l| Line::from(Span::styled(l, theme::dim()))).collect();
        let scroll = lines.len().saturating_sub(visible) as u16;
        let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
        frame.render_widget(paragraph, popup_area);
    }
}

pub fn run(
    conn: Connection,
    store: DailyConfigStore,
    config: AppConfig,
    clock: Box<dyn Clock>,
) -> Result<()> {
    let tick_rate_ms = config.display.tick_rate_ms;
    let mut app = App::new(config, store, clock);
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate_ms);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key, &conn);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Tick) => app.tick(&conn),
            Err(e) => break Err(e.into()),
        }
    };

    // Stop the tick thread before handing the terminal back
    drop(events);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{DailyPrayerValue, YearData, YearDayRecord};
    use crate::schedule::clock::FixedClock;
    use chrono::NaiveDateTime;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn setup(now: &str) -> (App, Connection, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = DailyConfigStore::new(dir.path().join("config.json"));
        let mut daily = DailyConfig::default();
        for (key, time) in [("fajr", "05:30"), ("dhuhr", "12:15"), ("asr", "15:45")] {
            daily
                .prayer_times
                .insert(key.to_string(), Some(DailyPrayerValue::Fixed(time.to_string())));
        }
        store.save(&daily).unwrap();

        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        for prayer in ["fajr", "asr"] {
            JobRepo::upsert(
                &conn,
                &ScheduledJob {
                    prayer: prayer.to_string(),
                    schedule: "0 5 * * *".to_string(),
                    command: None,
                    last_run: None,
                },
            )
            .unwrap();
        }

        let mut app = App::new(AppConfig::default(), store, Box::new(FixedClock(at(now))));
        app.load(&conn).unwrap();
        (app, conn, dir)
    }

    fn year(year: i32) -> YearData {
        YearData {
            year,
            data: vec![YearDayRecord {
                day_of_year: 1,
                date: format!("{}-01-01", year),
                fajr: "06:45".into(),
                dhuhr: "12:50".into(),
                asr: "14:55".into(),
                maghrib: "17:05".into(),
                isha: "18:35".into(),
                is_dst: false,
                gregorian: String::new(),
                hijri: String::new(),
            }],
            dst_transitions: vec![],
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn load_evaluates_rows_against_clock() {
        let (app, _conn, _dir) = setup("2025-03-01 13:00");
        let next = next_row(&app.rows).unwrap();
        assert_eq!(next.key, "asr");
        assert_eq!(next.state.countdown.as_deref(), Some("2 hrs 45 mins"));
        assert!(app.rows[0].state.passed);
        assert_eq!(app.jobs.len(), 2);
    }

    #[test]
    fn remove_focused_job() {
        let (mut app, conn, _dir) = setup("2025-03-01 13:00");
        app.handle_key(press(KeyCode::Down), &conn);
        app.handle_key(press(KeyCode::Char('x')), &conn);
        assert_eq!(app.jobs.len(), 1);
        assert_eq!(app.jobs[0].prayer, "fajr");
        assert_eq!(app.focus_idx, 0);
    }

    #[test]
    fn view_switching() {
        let (mut app, conn, _dir) = setup("2025-03-01 13:00");
        app.handle_key(press(KeyCode::Char('y')), &conn);
        assert_eq!(app.view, View::Year);
        app.handle_key(press(KeyCode::Char('?')), &conn);
        assert_eq!(app.view, View::Help);
        app.handle_key(press(KeyCode::Esc), &conn);
        assert_eq!(app.view, View::Year);
        assert!(!app.should_quit);
        app.handle_key(press(KeyCode::Right), &conn);
        assert_eq!(app.chart_year, 2026);
        assert!(app.chart.is_none());
        app.handle_key(press(KeyCode::Esc), &conn);
        assert!(app.should_quit);
    }

    #[test]
    fn new_year_moves_chart_to_current_year() {
        let (mut app, mut conn, _dir) = setup("2025-12-31 23:59");
        YearRepo::store_year(&mut conn, &year(2026)).unwrap();
        assert!(app.chart.is_none());

        app.clock = Box::new(FixedClock(at("2026-01-01 00:01")));
        app.tick(&conn);

        assert_eq!(app.today, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(app.chart_year, 2026);
        let chart = app.chart.as_ref().unwrap();
        assert_eq!(chart.year, 2026);
        assert_eq!(chart.today, Some(1));
    }

    #[test]
    fn same_year_date_change_keeps_browsed_year() {
        let (mut app, conn, _dir) = setup("2025-03-01 23:59");
        app.handle_key(press(KeyCode::Char('y')), &conn);
        app.handle_key(press(KeyCode::Left), &conn);
        assert_eq!(app.chart_year, 2024);

        app.clock = Box::new(FixedClock(at("2025-03-02 00:01")));
        app.tick(&conn);
        assert_eq!(app.today, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(app.chart_year, 2024);
    }

    #[test]
    fn chart_falls_back_to_year_file() {
        let (mut app, conn, dir) = setup("2025-06-01 10:00");
        assert!(app.chart.is_none());

        let path = dir.path().join("year.json");
        std::fs::write(&path, serde_json::to_string(&year(2025)).unwrap()).unwrap();
        app.config.sources.year_data = Some(path);
        app.load(&conn).unwrap();

        let chart = app.chart.as_ref().unwrap();
        assert_eq!(chart.rows.len(), 1);
        assert_eq!(chart.today, Some(152));
    }

    #[test]
    fn shows_focused_job_log() {
        let (mut app, conn, dir) = setup("2025-03-01 13:00");
        app.config.sources.job_log_dir = dir.path().to_path_buf();
        std::fs::write(dir.path().join("prayer-call-fajr.log"), "played adhan\n").unwrap();

        app.handle_key(press(KeyCode::Char('l')), &conn);
        assert_eq!(app.view, View::Logs);
        assert_eq!(app.job_log, Some(("Fajr".to_string(), "played adhan".to_string())));
        app.handle_key(press(KeyCode::Esc), &conn);
        assert_eq!(app.view, View::Dashboard);
        assert!(!app.should_quit);

        app.handle_key(press(KeyCode::Down), &conn);
        app.handle_key(press(KeyCode::Char('l')), &conn);
        assert_eq!(app.job_log.as_ref().map(|(_, t)| t.as_str()), Some(NO_LOGS));
    }
}
