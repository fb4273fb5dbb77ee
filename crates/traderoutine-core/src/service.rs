//! Check-in service: the read/write operations a front end drives.
//!
//! [`Tracker`] pairs a [`Store`] with a [`Catalog`]. Writes go through the
//! store; evaluation, streak and calendar queries materialize the records
//! they need first and then call the pure core.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::calendar::{month_bounds, recent_days, DaySummary, MonthView, MAX_RECENT_DAYS};
use crate::catalog::Catalog;
use crate::error::{Result, ValidationError};
use crate::evaluator::{evaluate, module_statuses, DayEvaluation, ModuleStatus};
use crate::record::{DayRecord, Mood};
use crate::settings::Settings;
use crate::storage::Store;
use crate::streak::streak;

/// Everything needed to render one day's checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub record: DayRecord,
    pub modules: Vec<ModuleStatus>,
    pub evaluation: DayEvaluation,
    pub module_count: usize,
}

pub struct Tracker<S: Store> {
    store: S,
    catalog: Catalog,
}

impl<S: Store> Tracker<S> {
    pub fn new(store: S, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn record_or_empty(&self, date: NaiveDate) -> Result<DayRecord> {
        Ok(self
            .store
            .record(date)?
            .unwrap_or_else(|| DayRecord::empty(date)))
    }

    pub fn day(&self, date: NaiveDate) -> Result<DayView> {
        let record = self.record_or_empty(date)?;
        Ok(DayView {
            date,
            modules: module_statuses(Some(&record), &self.catalog),
            evaluation: evaluate(Some(&record), &self.catalog),
            module_count: self.catalog.len(),
            record,
        })
    }

    /// Flip one option for `date` and return the updated record.
    ///
    /// # Errors
    /// `ValidationError::UnknownOption` if no module owns `option_id`.
    pub fn toggle_option(&self, date: NaiveDate, option_id: &str) -> Result<DayRecord> {
        if self.catalog.module_for_option(option_id).is_none() {
            return Err(ValidationError::UnknownOption(option_id.to_string()).into());
        }
        let mut record = self.record_or_empty(date)?;
        let checked = record.toggle(option_id);
        self.store.save_record(&record)?;
        debug!(%date, option_id, checked, "toggled option");
        Ok(record)
    }

    /// Replace the recap note; blank text clears it.
    pub fn set_note(&self, date: NaiveDate, text: &str) -> Result<DayRecord> {
        let mut record = self.record_or_empty(date)?;
        record.set_note(text);
        self.store.save_record(&record)?;
        Ok(record)
    }

    /// Record or clear the mood.
    ///
    /// # Errors
    /// `ValidationError::InvalidValue` if no reflection module offers `mood`.
    pub fn set_mood(&self, date: NaiveDate, mood: Option<Mood>) -> Result<DayRecord> {
        if let Some(mood) = mood {
            if !self.catalog.accepts_mood(mood) {
                return Err(ValidationError::InvalidValue {
                    field: "mood".into(),
                    message: format!("'{mood}' is not offered by the catalog"),
                }
                .into());
            }
        }
        let mut record = self.record_or_empty(date)?;
        record.set_mood(mood);
        self.store.save_record(&record)?;
        Ok(record)
    }

    /// Current streak ending at `reference`, honouring the stored weekend setting.
    pub fn streak(&self, reference: NaiveDate) -> Result<u32> {
        let settings = self.store.settings()?;
        let records: BTreeMap<NaiveDate, DayRecord> = self
            .store
            .all_records()?
            .into_iter()
            .filter(|r| r.date <= reference)
            .map(|r| (r.date, r))
            .collect();
        let count = streak(&records, &self.catalog, reference, settings.weekend_included);
        debug!(%reference, weekend_included = settings.weekend_included, count, "computed streak");
        Ok(count)
    }

    pub fn month(&self, year: i32, month: u32) -> Result<MonthView> {
        let (first, last) = month_bounds(year, month)?;
        let records = self.store.records_in_range(first, last)?;
        Ok(MonthView::build(year, month, &records, &self.catalog)?)
    }

    /// The last `days` days ending at `reference`, oldest first.
    ///
    /// # Errors
    /// `ValidationError::InvalidValue` if `days` exceeds [`MAX_RECENT_DAYS`].
    pub fn recent(&self, reference: NaiveDate, days: u32) -> Result<Vec<DaySummary>> {
        if days > MAX_RECENT_DAYS {
            return Err(ValidationError::InvalidValue {
                field: "days".into(),
                message: format!("at most {MAX_RECENT_DAYS} days can be listed"),
            }
            .into());
        }
        let start = reference
            .checked_sub_days(chrono::Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        let records = self.store.records_in_range(start, reference)?;
        Ok(recent_days(reference, days, &records, &self.catalog))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.store.settings()
    }

    /// Apply `update` to the stored settings and persist the result.
    pub fn update_settings(&self, update: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let mut settings = self.store.settings()?;
        update(&mut settings);
        self.store.save_settings(&settings)?;
        Ok(settings)
    }

    pub fn clear_all(&self) -> Result<()> {
        self.store.clear_all()?;
        info!("all check-in data cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::evaluator::CompletionTier;
    use crate::storage::Database;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker() -> Tracker<Database> {
        Tracker::new(Database::open_memory().unwrap(), Catalog::reference())
    }

    fn check_in(t: &Tracker<Database>, d: NaiveDate) {
        for id in ["dm_email", "social_post", "watch_peer"] {
            t.toggle_option(d, id).unwrap();
        }
    }

    #[test]
    fn day_view_for_untouched_date_is_empty() {
        let t = tracker();
        let view = t.day(date(2024, 6, 10)).unwrap();
        assert!(view.record.is_blank());
        assert_eq!(view.evaluation, DayEvaluation::EMPTY);
        assert_eq!(view.module_count, 6);
        assert_eq!(view.modules.len(), 6);
    }

    #[test]
    fn toggling_twice_unchecks() {
        let t = tracker();
        let d = date(2024, 6, 10);
        assert!(t.toggle_option(d, "dm_email").unwrap().is_checked("dm_email"));
        assert!(!t.toggle_option(d, "dm_email").unwrap().is_checked("dm_email"));
        assert_eq!(t.day(d).unwrap().evaluation.satisfied_count, 0);
    }

    #[test]
    fn unknown_option_is_rejected_without_writing() {
        let t = tracker();
        let err = t.toggle_option(date(2024, 6, 10), "nap").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UnknownOption(_))
        ));
        assert!(t.store().all_records().unwrap().is_empty());
    }

    #[test]
    fn recap_note_and_mood_satisfy_wrap_up() {
        let t = tracker();
        let d = date(2024, 6, 10);
        t.set_note(d, "closed one order").unwrap();
        let view = t.day(d).unwrap();
        assert!(view.modules.last().unwrap().satisfied);

        t.set_note(d, "").unwrap();
        assert!(!t.day(d).unwrap().modules.last().unwrap().satisfied);

        t.set_mood(d, Some(Mood::Annoyed)).unwrap();
        assert!(t.day(d).unwrap().modules.last().unwrap().satisfied);
    }

    #[test]
    fn streak_uses_stored_weekend_setting() {
        let t = tracker();
        // Fri 2024-06-07 and Mon 2024-06-10.
        check_in(&t, date(2024, 6, 7));
        check_in(&t, date(2024, 6, 10));

        assert_eq!(t.streak(date(2024, 6, 10)).unwrap(), 1);
        t.update_settings(|s| s.weekend_included = false).unwrap();
        assert_eq!(t.streak(date(2024, 6, 10)).unwrap(), 2);
    }

    #[test]
    fn streak_ignores_records_after_reference() {
        let t = tracker();
        check_in(&t, date(2024, 6, 11));
        check_in(&t, date(2024, 6, 12));
        assert_eq!(t.streak(date(2024, 6, 11)).unwrap(), 1);
    }

    #[test]
    fn month_and_recent_views_reflect_records() {
        let t = tracker();
        check_in(&t, date(2024, 6, 4));
        t.toggle_option(date(2024, 6, 5), "account_active").unwrap();

        let month = t.month(2024, 6).unwrap();
        assert_eq!(month.tier_counts().success, 1);
        assert_eq!(month.tier_counts().partial, 1);

        let recent = t.recent(date(2024, 6, 5), 3).unwrap();
        let tiers: Vec<_> = recent.iter().map(|d| d.tier).collect();
        assert_eq!(
            tiers,
            vec![CompletionTier::None, CompletionTier::Success, CompletionTier::Partial]
        );
    }

    #[test]
    fn recent_rejects_oversized_window() {
        let t = tracker();
        let err = t.recent(date(2024, 6, 10), 4_000_000_000).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidValue { ref field, .. }) if field == "days"
        ));
        assert_eq!(t.recent(date(2024, 6, 10), MAX_RECENT_DAYS).unwrap().len(), 366);
    }

    #[test]
    fn mood_outside_status_options_is_rejected() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[modules]]
            id = "journal"
            title = "Journal"
            reflection = true
            status_options = ["smooth"]
            "#,
        )
        .unwrap();
        let t = Tracker::new(Database::open_memory().unwrap(), catalog);
        let d = date(2024, 6, 10);

        let err = t.set_mood(d, Some(Mood::Tired)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidValue { ref field, .. }) if field == "mood"
        ));
        assert!(t.store().record(d).unwrap().is_none());
        assert_eq!(t.day(d).unwrap().evaluation.satisfied_count, 0);

        assert_eq!(t.set_mood(d, Some(Mood::Smooth)).unwrap().mood, Some(Mood::Smooth));
        assert!(t.set_mood(d, None).unwrap().mood.is_none());
    }

    #[test]
    fn mood_needs_a_reflection_module() {
        let catalog = Catalog::from_toml_str(
            "[[modules]]\nid = \"gym\"\ntitle = \"Gym\"\noptions = [{ id = \"lift\", label = \"Lift\" }]\n",
        )
        .unwrap();
        let t = Tracker::new(Database::open_memory().unwrap(), catalog);
        assert!(t.set_mood(date(2024, 6, 10), Some(Mood::Normal)).is_err());
    }

    #[test]
    fn clear_all_resets_everything() {
        let t = tracker();
        check_in(&t, date(2024, 6, 10));
        t.update_settings(|s| s.dark_mode = true).unwrap();

        t.clear_all().unwrap();

        assert_eq!(t.streak(date(2024, 6, 10)).unwrap(), 0);
        assert_eq!(t.settings().unwrap(), Settings::default());
    }
}
