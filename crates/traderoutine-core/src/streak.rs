//! Consecutive-day streak calculation.
//!
//! Walks backward from a reference date, counting successful days until the
//! first day that is not a success. With weekends excluded, Saturdays and
//! Sundays are stepped over without counting or breaking the chain.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::catalog::Catalog;
use crate::evaluator::evaluate;
use crate::record::DayRecord;

/// Read access to day records keyed by date.
///
/// Lookups are total: a date with no data is simply `None`.
pub trait RecordLookup {
    fn record_for(&self, date: NaiveDate) -> Option<DayRecord>;
}

impl<T: RecordLookup + ?Sized> RecordLookup for &T {
    fn record_for(&self, date: NaiveDate) -> Option<DayRecord> {
        (**self).record_for(date)
    }
}

impl RecordLookup for HashMap<NaiveDate, DayRecord> {
    fn record_for(&self, date: NaiveDate) -> Option<DayRecord> {
        self.get(&date).cloned()
    }
}

impl RecordLookup for BTreeMap<NaiveDate, DayRecord> {
    fn record_for(&self, date: NaiveDate) -> Option<DayRecord> {
        self.get(&date).cloned()
    }
}

impl RecordLookup for [DayRecord] {
    fn record_for(&self, date: NaiveDate) -> Option<DayRecord> {
        self.iter().find(|r| r.date == date).cloned()
    }
}

impl RecordLookup for Vec<DayRecord> {
    fn record_for(&self, date: NaiveDate) -> Option<DayRecord> {
        self.as_slice().record_for(date)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count consecutive successful days ending at `reference`.
///
/// An absent record evaluates to no modules satisfied, so the scan stops at
/// the first weekday without data.
pub fn streak<L: RecordLookup + ?Sized>(
    records: &L,
    catalog: &Catalog,
    reference: NaiveDate,
    weekend_included: bool,
) -> u32 {
    let mut cursor = reference;
    let mut count = 0;

    loop {
        if !weekend_included && is_weekend(cursor) {
            match cursor.pred_opt() {
                Some(prev) => {
                    cursor = prev;
                    continue;
                }
                None => break,
            }
        }

        let record = records.record_for(cursor);
        if !evaluate(record.as_ref(), catalog).tier.is_success() {
            break;
        }
        count += 1;

        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }

    count
}
