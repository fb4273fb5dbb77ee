mod config;
pub mod database;
pub mod migrations;

pub use config::{CatalogConfig, Config, LoggingConfig, StorageConfig};
pub use database::Database;

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{ConfigError, Result};
use crate::record::DayRecord;
use crate::settings::Settings;

/// Persistence boundary for settings and day records.
///
/// Reads of a missing record return `Ok(None)`. Implementations normalize
/// malformed stored data to "absent" instead of failing.
pub trait Store {
    fn settings(&self) -> Result<Settings>;
    fn record(&self, date: NaiveDate) -> Result<Option<DayRecord>>;
    /// Records with `start <= date <= end`, oldest first.
    fn records_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DayRecord>>;
    fn all_records(&self) -> Result<Vec<DayRecord>>;
    /// Insert or replace the record for `record.date`.
    fn save_record(&self, record: &DayRecord) -> Result<()>;
    fn save_settings(&self, settings: &Settings) -> Result<()>;
    /// Drop every record and reset settings.
    fn clear_all(&self) -> Result<()>;
}

/// Returns the application data directory.
///
/// `TRADEROUTINE_DATA_DIR` wins when set. Otherwise `~/.config/traderoutine`,
/// or `~/.config/traderoutine-dev` with `TRADEROUTINE_ENV=dev`.
///
/// # Errors
/// Returns an error if no home directory is known or the directory cannot
/// be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TRADEROUTINE_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");
            let env = std::env::var("TRADEROUTINE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("traderoutine-dev")
            } else {
                base_dir.join("traderoutine")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
