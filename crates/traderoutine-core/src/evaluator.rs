//! Day completion evaluator.
//!
//! Rolls a day's checked options up into a count of satisfied modules and a
//! [`CompletionTier`]. Pure and total: a missing record evaluates exactly like
//! an empty one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ModuleDefinition};
use crate::record::DayRecord;

/// Satisfied modules needed for a successful check-in.
///
/// Fixed regardless of catalog size.
pub const SUCCESS_THRESHOLD: usize = 3;

/// Derived completion classification of a day. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTier {
    /// Nothing satisfied.
    None,
    /// One or two modules satisfied.
    Partial,
    /// At least [`SUCCESS_THRESHOLD`] modules satisfied.
    Success,
}

impl CompletionTier {
    pub fn from_count(satisfied: usize) -> Self {
        match satisfied {
            0 => CompletionTier::None,
            n if n < SUCCESS_THRESHOLD => CompletionTier::Partial,
            _ => CompletionTier::Success,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompletionTier::Success)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompletionTier::None => "not checked in",
            CompletionTier::Partial => "1-2 done",
            CompletionTier::Success => "3+ done",
        }
    }
}

impl fmt::Display for CompletionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of evaluating one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEvaluation {
    pub satisfied_count: usize,
    pub tier: CompletionTier,
}

impl DayEvaluation {
    pub const EMPTY: DayEvaluation = DayEvaluation {
        satisfied_count: 0,
        tier: CompletionTier::None,
    };
}

/// Per-module view of a day, for checklist rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    pub module_id: String,
    pub title: String,
    pub checked_options: Vec<String>,
    pub satisfied: bool,
}

/// Any checked option satisfies a module; the reflection module is also
/// satisfied by a non-blank note or a mood.
pub fn is_module_satisfied(module: &ModuleDefinition, record: &DayRecord) -> bool {
    if module.options.iter().any(|o| record.is_checked(&o.id)) {
        return true;
    }
    module.reflection && (record.has_note() || record.has_mood())
}

/// Count satisfied modules and classify the day.
pub fn evaluate(record: Option<&DayRecord>, catalog: &Catalog) -> DayEvaluation {
    let Some(record) = record else {
        return DayEvaluation::EMPTY;
    };

    let satisfied_count = catalog
        .iter()
        .filter(|module| is_module_satisfied(module, record))
        .count();

    DayEvaluation {
        satisfied_count,
        tier: CompletionTier::from_count(satisfied_count),
    }
}

/// Checklist state of every module, in catalog order.
pub fn module_statuses(record: Option<&DayRecord>, catalog: &Catalog) -> Vec<ModuleStatus> {
    catalog
        .iter()
        .map(|module| {
            let (checked_options, satisfied) = match record {
                Some(record) => (
                    module
                        .options
                        .iter()
                        .filter(|o| record.is_checked(&o.id))
                        .map(|o| o.id.clone())
                        .collect(),
                    is_module_satisfied(module, record),
                ),
                None => (Vec::new(), false),
            };
            ModuleStatus {
                module_id: module.id.clone(),
                title: module.title.clone(),
                checked_options,
                satisfied,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Mood;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn day() -> DayRecord {
        DayRecord::empty(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
    }

    fn with_checked(ids: &[&str]) -> DayRecord {
        let mut record = day();
        for id in ids {
            record.set_checked(id, true);
        }
        record
    }

    #[test]
    fn absent_and_empty_records_evaluate_the_same() {
        let catalog = Catalog::reference();
        assert_eq!(evaluate(None, &catalog), DayEvaluation::EMPTY);
        assert_eq!(evaluate(Some(&day()), &catalog), DayEvaluation::EMPTY);
    }

    #[test]
    fn options_in_the_same_module_count_once() {
        let catalog = Catalog::reference();
        let record = with_checked(&["watch_peer", "watch_customer", "watch_industry"]);
        let eval = evaluate(Some(&record), &catalog);
        assert_eq!(eval.satisfied_count, 1);
        assert_eq!(eval.tier, CompletionTier::Partial);
    }

    #[test]
    fn three_modules_is_success() {
        let catalog = Catalog::reference();
        let record = with_checked(&["dm_email", "social_post", "account_active"]);
        let eval = evaluate(Some(&record), &catalog);
        assert_eq!(eval.satisfied_count, 3);
        assert_eq!(eval.tier, CompletionTier::Success);
    }

    #[test]
    fn note_alone_satisfies_reflection_module() {
        let catalog = Catalog::reference();
        let mut record = day();
        record.set_note("quiet day, two quotes sent");
        assert_eq!(evaluate(Some(&record), &catalog).satisfied_count, 1);
    }

    #[test]
    fn mood_alone_satisfies_reflection_module() {
        let catalog = Catalog::reference();
        let mut record = day();
        record.set_mood(Some(Mood::Tired));
        assert_eq!(evaluate(Some(&record), &catalog).satisfied_count, 1);
    }

    #[test]
    fn blank_note_without_mood_does_not_satisfy() {
        let catalog = Catalog::reference();
        let mut record = day();
        record.note = Some("   ".into());
        assert_eq!(evaluate(Some(&record), &catalog).satisfied_count, 0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let catalog = Catalog::reference();
        let record = with_checked(&["long_lunch", "nap"]);
        assert_eq!(evaluate(Some(&record), &catalog), DayEvaluation::EMPTY);
    }

    #[test]
    fn threshold_does_not_scale_with_catalog_size() {
        let small = Catalog::new(Catalog::reference().modules()[..3].to_vec()).unwrap();
        let record = with_checked(&["dm_email", "social_post"]);
        assert_eq!(evaluate(Some(&record), &small).tier, CompletionTier::Partial);

        let record = with_checked(&["dm_email", "social_post", "watch_peer"]);
        assert_eq!(evaluate(Some(&record), &small).tier, CompletionTier::Success);
    }

    #[test]
    fn module_statuses_follow_catalog_order() {
        let catalog = Catalog::reference();
        let mut record = with_checked(&["follow_old", "learn_process"]);
        record.set_mood(Some(Mood::Smooth));
        let statuses = module_statuses(Some(&record), &catalog);

        let ids: Vec<_> = statuses.iter().map(|s| s.module_id.as_str()).collect();
        assert_eq!(
            ids,
            ["customer_reach", "exposure_content", "industry_observe", "account_maintenance", "product_tech", "wrap_up"]
        );
        assert_eq!(statuses[0].checked_options, vec!["follow_old".to_string()]);
        let satisfied: Vec<_> = statuses.iter().map(|s| s.satisfied).collect();
        assert_eq!(satisfied, [true, false, false, false, true, true]);
    }

    #[test]
    fn module_statuses_for_absent_record_are_unsatisfied() {
        let statuses = module_statuses(None, &Catalog::reference());
        assert!(statuses.iter().all(|s| !s.satisfied && s.checked_options.is_empty()));
    }

    // One option from each of the five option-bearing modules.
    const ONE_PER_MODULE: [&str; 5] = [
        "dm_email",
        "social_post",
        "watch_peer",
        "account_active",
        "review_drawing",
    ];

    proptest! {
        #[test]
        fn tier_matches_satisfied_count(mask in 0u8..32, reflect in any::<bool>()) {
            let catalog = Catalog::reference();
            let mut record = day();
            for (i, id) in ONE_PER_MODULE.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    record.set_checked(id, true);
                }
            }
            if reflect {
                record.set_note("done");
            }
            let expected = mask.count_ones() as usize + usize::from(reflect);

            let eval = evaluate(Some(&record), &catalog);
            prop_assert_eq!(eval.satisfied_count, expected);
            let tier = match expected {
                0 => CompletionTier::None,
                1 | 2 => CompletionTier::Partial,
                _ => CompletionTier::Success,
            };
            prop_assert_eq!(eval.tier, tier);
            prop_assert_eq!(evaluate(Some(&record), &catalog), eval);
        }
    }
}
