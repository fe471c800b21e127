use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::{DstTransition, ScheduledJob, YearData, YearDayRecord};
use crate::schedule::order::sort_by_prayer_order;

// ─── Year times ─────────────────────────────────────────────────────────────

pub struct YearRepo;

impl YearRepo {
    /// Cached year from the database, else from `file` when it holds that year.
    pub fn load_or_file(conn: &Connection, year: i32, file: Option<&Path>) -> Result<Option<YearData>> {
        if let Some(data) = Self::load_year(conn, year)? {
            return Ok(Some(data));
        }
        let Some(path) = file.filter(|p| p.exists()) else {
            return Ok(None);
        };
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let data: YearData =
            serde_json::from_str(&content).with_context(|| format!("Parsing {:?}", path))?;
        if data.year != year {
            log::debug!("{:?} holds {}, not {}", path, data.year, year);
            return Ok(None);
        }
        log::info!("Loaded {} from {:?}", year, path);
        Ok(Some(data))
    }

    /// Replace everything stored for `year.year`.
    pub fn store_year(conn: &mut Connection, year: &YearData) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM year_times WHERE year = ?1", params![year.year])?;
        tx.execute("DELETE FROM dst_transitions WHERE year = ?1", params![year.year])?;
        for day in &year.data {
            tx.execute(
                "INSERT OR REPLACE INTO year_times
                    (date, year, day_of_year, fajr, dhuhr, asr, maghrib, isha, is_dst, gregorian, hijri)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    day.date,
                    year.year,
                    day.day_of_year,
                    day.fajr,
                    day.dhuhr,
                    day.asr,
                    day.maghrib,
                    day.isha,
                    day.is_dst,
                    day.gregorian,
                    day.hijri,
                ],
            )?;
        }
        for t in &year.dst_transitions {
            tx.execute(
                "INSERT OR REPLACE INTO dst_transitions (year, day_of_year, date) VALUES (?1, ?2, ?3)",
                params![year.year, t.day_of_year, t.date],
            )?;
        }
        tx.commit()?;
        log::info!("Stored {} days for {}", year.data.len(), year.year);
        Ok(())
    }

    /// `None` when nothing is stored for `year`.
    pub fn load_year(conn: &Connection, year: i32) -> Result<Option<YearData>> {
        let mut stmt = conn.prepare(
            "SELECT day_of_year, date, fajr, dhuhr, asr, maghrib, isha, is_dst, gregorian, hijri
             FROM year_times WHERE year = ?1 ORDER BY day_of_year",
        )?;
        let rows = stmt.query_map(params![year], |row| {
            Ok(YearDayRecord {
                day_of_year: row.get(0)?,
                date: row.get(1)?,
                fajr: row.get(2)?,
                dhuhr: row.get(3)?,
                asr: row.get(4)?,
                maghrib: row.get(5)?,
                isha: row.get(6)?,
                is_dst: row.get::<_, i32>(7)? != 0,
                gregorian: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
                hijri: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
            })
        })?;
        let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        if data.is_empty() {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT day_of_year, date FROM dst_transitions WHERE year = ?1 ORDER BY day_of_year",
        )?;
        let dst_transitions = stmt
            .query_map(params![year], |row| {
                Ok(DstTransition {
                    day_of_year: row.get(0)?,
                    date: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(YearData {
            year,
            data,
            dst_transitions,
        }))
    }
}

// ─── Scheduled jobs ─────────────────────────────────────────────────────────

pub struct JobRepo;

impl JobRepo {
    /// All jobs, reschedule first then in prayer order.
    pub fn list(conn: &Connection) -> Result<Vec<ScheduledJob>> {
        let mut stmt =
            conn.prepare("SELECT prayer, schedule, command, last_run FROM scheduled_jobs ORDER BY rowid")?;
        let mut jobs = stmt
            .query_map([], |row| {
                Ok(ScheduledJob {
                    prayer: row.get(0)?,
                    schedule: row.get(1)?,
                    command: row.get(2)?,
                    last_run: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        sort_by_prayer_order(&mut jobs);
        Ok(jobs)
    }

    pub fn upsert(conn: &Connection, job: &ScheduledJob) -> Result<()> {
        conn.execute(
            "INSERT INTO scheduled_jobs (prayer, schedule, command, last_run)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(prayer) DO UPDATE SET
                schedule = excluded.schedule,
                command = excluded.command,
                last_run = COALESCE(excluded.last_run, scheduled_jobs.last_run)",
            params![job.prayer, job.schedule, job.command, job.last_run],
        )?;
        Ok(())
    }

    /// Returns false when no job exists for `prayer`.
    pub fn remove(conn: &Connection, prayer: &str) -> Result<bool> {
        let n = conn.execute("DELETE FROM scheduled_jobs WHERE prayer = ?1", params![prayer])?;
        if n > 0 {
            log::info!("Removed scheduled job for {}", prayer);
        }
        Ok(n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn day(n: u32, is_dst: bool) -> YearDayRecord {
        YearDayRecord {
            day_of_year: n,
            date: format!("2025-01-{:02}", n),
            fajr: "06:30".into(),
            dhuhr: "12:45".into(),
            asr: "15:00".into(),
            maghrib: "17:10".into(),
            isha: "18:40".into(),
            is_dst,
            gregorian: format!("January {}", n),
            hijri: String::new(),
        }
    }

    fn job(prayer: &str, last_run: Option<&str>) -> ScheduledJob {
        ScheduledJob {
            prayer: prayer.into(),
            schedule: "0 5 * * *".into(),
            command: Some(format!("play {}", prayer)),
            last_run: last_run.map(String::from),
        }
    }

    #[test]
    fn year_round_trip_replaces_previous() {
        let mut conn = conn();
        let first = YearData {
            year: 2025,
            data: vec![day(2, false), day(1, true), day(3, false)],
            dst_transitions: vec![DstTransition { day_of_year: 2, date: "2025-01-02".into() }],
        };
        YearRepo::store_year(&mut conn, &first).unwrap();

        let loaded = YearRepo::load_year(&conn, 2025).unwrap().unwrap();
        let days: Vec<u32> = loaded.data.iter().map(|d| d.day_of_year).collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert!(loaded.data[0].is_dst);
        assert_eq!(loaded.dst_transitions, first.dst_transitions);

        let second = YearData { year: 2025, data: vec![day(5, false)], dst_transitions: vec![] };
        YearRepo::store_year(&mut conn, &second).unwrap();
        let loaded = YearRepo::load_year(&conn, 2025).unwrap().unwrap();
        assert_eq!(loaded.data.len(), 1);
        assert!(loaded.dst_transitions.is_empty());
    }

    #[test]
    fn unknown_year_is_none() {
        assert!(YearRepo::load_year(&conn(), 1999).unwrap().is_none());
    }

    #[test]
    fn year_file_used_when_nothing_cached() {
        let mut conn = conn();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("year.json");
        let from_file = YearData { year: 2025, data: vec![day(1, false)], dst_transitions: vec![] };
        std::fs::write(&path, serde_json::to_string(&from_file).unwrap()).unwrap();

        let loaded = YearRepo::load_or_file(&conn, 2025, Some(&path)).unwrap();
        assert_eq!(loaded, Some(from_file));
        // other years are not served from the file
        assert!(YearRepo::load_or_file(&conn, 2026, Some(&path)).unwrap().is_none());
        assert!(YearRepo::load_or_file(&conn, 2025, Some(&dir.path().join("missing.json")))
            .unwrap()
            .is_none());

        let cached = YearData { year: 2025, data: vec![day(1, false), day(2, false)], dst_transitions: vec![] };
        YearRepo::store_year(&mut conn, &cached).unwrap();
        let loaded = YearRepo::load_or_file(&conn, 2025, Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.data.len(), 2);
    }

    #[test]
    fn corrupt_year_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("year.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(YearRepo::load_or_file(&conn(), 2025, Some(&path)).is_err());
    }

    #[test]
    fn jobs_list_in_prayer_order() {
        let conn = conn();
        for prayer in ["isha", "fajr", "reschedule", "asr"] {
            JobRepo::upsert(&conn, &job(prayer, None)).unwrap();
        }
        let prayers: Vec<String> = JobRepo::list(&conn).unwrap().into_iter().map(|j| j.prayer).collect();
        assert_eq!(prayers, ["reschedule", "fajr", "asr", "isha"]);
    }

    #[test]
    fn upsert_keeps_last_run_when_absent() {
        let conn = conn();
        JobRepo::upsert(&conn, &job("fajr", Some("2025-03-14T05:00:01"))).unwrap();
        let mut updated = job("fajr", None);
        updated.schedule = "10 5 * * *".into();
        JobRepo::upsert(&conn, &updated).unwrap();

        let jobs = JobRepo::list(&conn).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].schedule, "10 5 * * *");
        assert_eq!(jobs[0].last_run.as_deref(), Some("2025-03-14T05:00:01"));
    }

    #[test]
    fn remove_reports_missing_jobs() {
        let conn = conn();
        JobRepo::upsert(&conn, &job("maghrib", None)).unwrap();
        assert!(JobRepo::remove(&conn, "maghrib").unwrap());
        assert!(!JobRepo::remove(&conn, "maghrib").unwrap());
        assert!(JobRepo::list(&conn).unwrap().is_empty());
    }
}
