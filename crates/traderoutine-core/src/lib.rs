//! # TradeRoutine Core Library
//!
//! Business logic for a personal daily check-in routine: the user ticks off
//! small tasks grouped into modules, and the library decides whether the day
//! counts and how long the current streak is.
//!
//! ## Architecture
//!
//! - **Evaluator**: rolls a day's checked options into a satisfied-module
//!   count and a completion tier
//! - **Streak**: walks backward from an explicit reference date counting
//!   successful days, optionally stepping over weekends
//! - **Calendar**: per-day tiers for month grids and recent history
//! - **Storage**: SQLite record/settings store and TOML configuration
//!
//! The evaluator, streak calculator and calendar projection are pure: they
//! take the catalog and records as arguments and never read the clock.
//!
//! ## Key Components
//!
//! - [`Catalog`]: the module checklist, injected into every evaluation
//! - [`evaluate`] / [`streak`]: the pure core
//! - [`Tracker`]: store-backed facade used by front ends
//! - [`Database`]: [`Store`] implementation
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod record;
pub mod service;
pub mod settings;
pub mod storage;
pub mod streak;

pub use calendar::{recent_days, tier_for_date, DaySummary, MonthView, TierCounts, MAX_RECENT_DAYS};
pub use catalog::{Catalog, ModuleDefinition, ModuleOption};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use evaluator::{
    evaluate, is_module_satisfied, module_statuses, CompletionTier, DayEvaluation, ModuleStatus,
    SUCCESS_THRESHOLD,
};
pub use record::{date_key, parse_date_key, DayRecord, Mood};
pub use service::{DayView, Tracker};
pub use settings::Settings;
pub use storage::{data_dir, Config, Database, Store};
pub use streak::{is_weekend, streak, RecordLookup};
