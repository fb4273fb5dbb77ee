pub mod catalog;
pub mod config;
pub mod day;
pub mod history;
pub mod settings;

use chrono::NaiveDate;
use tracing::debug;
use traderoutine_core::{Config, Database, Tracker};

/// Open the configured database with the configured catalog.
pub fn open_tracker(config: &Config) -> Result<Tracker<Database>, Box<dyn std::error::Error>> {
    debug!(
        database = %config.database_path()?.display(),
        catalog = config.catalog.path.as_deref().unwrap_or("built-in"),
        "opening tracker"
    );
    let db = Database::open(config)?;
    let catalog = config.load_catalog()?;
    debug!(modules = catalog.len(), "catalog loaded");
    Ok(Tracker::new(db, catalog))
}

/// The given date, or today in local time.
pub fn date_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

pub fn clear(yes: bool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("refusing to clear all data without --yes".into());
    }
    open_tracker(config)?.clear_all()?;
    println!("all records and settings cleared");
    Ok(())
}
