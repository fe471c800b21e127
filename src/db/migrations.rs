use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS year_times (
            date         TEXT PRIMARY KEY,
            year         INTEGER NOT NULL,
            day_of_year  INTEGER NOT NULL,
            fajr         TEXT NOT NULL,
            dhuhr        TEXT NOT NULL,
            asr          TEXT NOT NULL,
            maghrib      TEXT NOT NULL,
            isha         TEXT NOT NULL,
            is_dst       INTEGER DEFAULT 0,
            gregorian    TEXT,
            hijri        TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_year_times_year ON year_times(year, day_of_year);

        CREATE TABLE IF NOT EXISTS dst_transitions (
            year         INTEGER NOT NULL,
            day_of_year  INTEGER NOT NULL,
            date         TEXT NOT NULL,
            PRIMARY KEY (year, day_of_year)
        );

        CREATE TABLE IF NOT EXISTS scheduled_jobs (
            prayer    TEXT PRIMARY KEY,
            schedule  TEXT NOT NULL,
            command   TEXT,
            last_run  TEXT
        );
    ")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }
}
