//! SQLite-backed storage for day records and settings.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

use crate::error::{DatabaseError, Result};
use crate::record::{date_key, parse_date_key, DayRecord, Mood};
use crate::settings::Settings;

use super::{migrations, Config, Store};

/// Default database file name inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "traderoutine.db";

/// Raw column values of a `day_records` row.
struct RawRecord {
    date: String,
    completed: String,
    note: Option<String>,
    mood: Option<String>,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            date: row.get(0)?,
            completed: row.get(1)?,
            note: row.get(2)?,
            mood: row.get(3)?,
        })
    }

    /// Decode into a record, or `None` if any column is malformed.
    fn decode(self) -> Option<DayRecord> {
        let date = match parse_date_key(&self.date) {
            Ok(d) => d,
            Err(e) => {
                warn!(date = %self.date, error = %e, "skipping day record with bad date");
                return None;
            }
        };
        let completed: BTreeSet<String> = match serde_json::from_str(&self.completed) {
            Ok(c) => c,
            Err(e) => {
                warn!(date = %self.date, error = %e, "skipping day record with corrupt option list");
                return None;
            }
        };
        let mood = match self.mood.as_deref().map(str::parse::<Mood>).transpose() {
            Ok(m) => m,
            Err(e) => {
                warn!(date = %self.date, error = %e, "skipping day record with unknown mood");
                return None;
            }
        };
        Some(DayRecord {
            date,
            completed,
            note: self.note,
            mood,
        })
    }
}

/// SQLite database for day records and settings.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database file named by `config` (`storage.database_file`).
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(&config.database_path()?)
    }

    /// Open (creating if needed) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn query_records(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<DayRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, RawRecord::from_row)?;
        let mut records = Vec::new();
        for row in rows {
            if let Some(record) = row?.decode() {
                records.push(record);
            }
        }
        Ok(records)
    }
}

impl Store for Database {
    fn settings(&self) -> Result<Settings> {
        let settings = self
            .conn
            .query_row(
                "SELECT reminder_enabled, dark_mode, weekend_included FROM settings WHERE id = 0",
                [],
                |row| {
                    Ok(Settings {
                        reminder_enabled: row.get(0)?,
                        dark_mode: row.get(1)?,
                        weekend_included: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(settings.unwrap_or_default())
    }

    fn record(&self, date: NaiveDate) -> Result<Option<DayRecord>> {
        let raw = self
            .conn
            .query_row(
                "SELECT date, completed, note, mood FROM day_records WHERE date = ?1",
                params![date_key(date)],
                RawRecord::from_row,
            )
            .optional()?;
        Ok(raw.and_then(RawRecord::decode))
    }

    fn records_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DayRecord>> {
        self.query_records(
            "SELECT date, completed, note, mood FROM day_records
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC",
            params![date_key(start), date_key(end)],
        )
    }

    fn all_records(&self) -> Result<Vec<DayRecord>> {
        self.query_records(
            "SELECT date, completed, note, mood FROM day_records ORDER BY date ASC",
            [],
        )
    }

    fn save_record(&self, record: &DayRecord) -> Result<()> {
        let completed = serde_json::to_string(&record.completed)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO day_records (date, completed, note, mood, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.date_key(),
                completed,
                record.note,
                record.mood.map(|m| m.as_str()),
                Utc::now().to_rfc3339(),
            ],
        )?;
        debug!(date = %record.date, checked = record.completed.len(), "saved day record");
        Ok(())
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (id, reminder_enabled, dark_mode, weekend_included)
             VALUES (0, ?1, ?2, ?3)",
            params![
                settings.reminder_enabled,
                settings.dark_mode,
                settings.weekend_included
            ],
        )?;
        debug!(?settings, "saved settings");
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM day_records", [])?;
        tx.execute("DELETE FROM settings", [])?;
        tx.commit()?;
        debug!("cleared all records and settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(d: NaiveDate) -> DayRecord {
        let mut record = DayRecord::empty(d);
        record.set_checked("dm_email", true);
        record.set_checked("watch_peer", true);
        record.set_note("sent two quotes");
        record.set_mood(Some(Mood::Smooth));
        record
    }

    #[test]
    fn save_and_load_record() {
        let db = Database::open_memory().unwrap();
        let record = sample(date(2024, 6, 10));
        db.save_record(&record).unwrap();
        assert_eq!(db.record(date(2024, 6, 10)).unwrap(), Some(record));
        assert_eq!(db.record(date(2024, 6, 11)).unwrap(), None);
    }

    #[test]
    fn save_replaces_existing_record() {
        let db = Database::open_memory().unwrap();
        db.save_record(&sample(date(2024, 6, 10))).unwrap();

        let replacement = DayRecord::empty(date(2024, 6, 10));
        db.save_record(&replacement).unwrap();

        assert_eq!(db.record(date(2024, 6, 10)).unwrap(), Some(replacement));
        assert_eq!(db.all_records().unwrap().len(), 1);
    }

    #[test]
    fn range_is_inclusive_and_sorted() {
        let db = Database::open_memory().unwrap();
        for d in [12, 9, 10, 11, 13] {
            db.save_record(&sample(date(2024, 6, d))).unwrap();
        }
        let dates: Vec<_> = db
            .records_in_range(date(2024, 6, 10), date(2024, 6, 12))
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, vec![date(2024, 6, 10), date(2024, 6, 11), date(2024, 6, 12)]);
    }

    #[test]
    fn settings_default_until_saved() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.settings().unwrap(), Settings::default());

        let custom = Settings {
            reminder_enabled: true,
            dark_mode: true,
            weekend_included: false,
        };
        db.save_settings(&custom).unwrap();
        assert_eq!(db.settings().unwrap(), custom);
    }

    #[test]
    fn clear_all_removes_records_and_settings() {
        let db = Database::open_memory().unwrap();
        db.save_record(&sample(date(2024, 6, 10))).unwrap();
        db.save_settings(&Settings {
            weekend_included: false,
            ..Settings::default()
        })
        .unwrap();

        db.clear_all().unwrap();

        assert!(db.all_records().unwrap().is_empty());
        assert_eq!(db.settings().unwrap(), Settings::default());
    }

    #[test]
    fn corrupt_rows_read_as_absent() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO day_records (date, completed, note, mood) VALUES
                 ('2024-06-10', 'not json', NULL, NULL),
                 ('2024-06-11', '[\"dm_email\"]', NULL, 'ecstatic'),
                 ('yesterday', '[]', NULL, NULL),
                 ('2024-06-12', '[\"dm_email\"]', NULL, 'tired')",
                [],
            )
            .unwrap();

        assert_eq!(db.record(date(2024, 6, 10)).unwrap(), None);
        assert_eq!(db.record(date(2024, 6, 11)).unwrap(), None);
        let all = db.all_records().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].mood, Some(Mood::Tired));
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.save_record(&sample(date(2024, 6, 10))).unwrap();
        }
        let reopened = Database::open_at(&path).unwrap();
        assert!(reopened.record(date(2024, 6, 10)).unwrap().is_some());
    }

    #[test]
    fn open_uses_configured_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.db");
        let mut config = Config::default();
        config.storage.database_file = path.to_string_lossy().into_owned();

        let db = Database::open(&config).unwrap();
        db.save_record(&sample(date(2024, 6, 10))).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join(DEFAULT_DATABASE_FILE).exists());
    }
}
