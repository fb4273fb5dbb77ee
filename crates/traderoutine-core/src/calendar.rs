//! Calendar projections: per-day tiers for month grids and recent history.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::evaluator::{evaluate, CompletionTier};
use crate::streak::RecordLookup;

/// Tier of a single date, as used to colour a calendar cell.
pub fn tier_for_date<L: RecordLookup + ?Sized>(
    date: NaiveDate,
    records: &L,
    catalog: &Catalog,
) -> CompletionTier {
    summarize(date, records, catalog).tier
}

/// One calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub satisfied_count: usize,
    pub tier: CompletionTier,
}

fn summarize<L: RecordLookup + ?Sized>(date: NaiveDate, records: &L, catalog: &Catalog) -> DaySummary {
    let record = records.record_for(date);
    let eval = evaluate(record.as_ref(), catalog);
    DaySummary {
        date,
        satisfied_count: eval.satisfied_count,
        tier: eval.tier,
    }
}

/// Tally of tiers across a range of days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub none: u32,
    pub partial: u32,
    pub success: u32,
}

/// A month laid out for a Sunday-first grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first week row.
    pub leading_blanks: u32,
    pub days: Vec<DaySummary>,
}

impl MonthView {
    pub fn build<L: RecordLookup + ?Sized>(
        year: i32,
        month: u32,
        records: &L,
        catalog: &Catalog,
    ) -> Result<Self, ValidationError> {
        let (first, last) = month_bounds(year, month)?;
        let days = first
            .iter_days()
            .take_while(|d| *d <= last)
            .map(|d| summarize(d, records, catalog))
            .collect();

        Ok(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    pub fn tier_counts(&self) -> TierCounts {
        self.days.iter().fold(TierCounts::default(), |mut acc, day| {
            match day.tier {
                CompletionTier::None => acc.none += 1,
                CompletionTier::Partial => acc.partial += 1,
                CompletionTier::Success => acc.success += 1,
            }
            acc
        })
    }

    /// Rows of seven cells, `None` for padding outside the month.
    pub fn weeks(&self) -> Vec<[Option<DaySummary>; 7]> {
        let mut cells: Vec<Option<DaySummary>> = vec![None; self.leading_blanks as usize];
        cells.extend(self.days.iter().copied().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells
            .chunks(7)
            .map(|row| {
                let mut week = [None; 7];
                week.copy_from_slice(row);
                week
            })
            .collect()
    }
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let invalid = || ValidationError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next.pred_opt().ok_or_else(invalid)?;
    Ok((first, last))
}

/// Longest window [`recent_days`] will produce.
pub const MAX_RECENT_DAYS: u32 = 366;

/// The `days` days ending at `reference`, oldest first.
///
/// Windows longer than [`MAX_RECENT_DAYS`] are truncated to that length.
pub fn recent_days<L: RecordLookup + ?Sized>(
    reference: NaiveDate,
    days: u32,
    records: &L,
    catalog: &Catalog,
) -> Vec<DaySummary> {
    let days = days.min(MAX_RECENT_DAYS);
    if days == 0 {
        return Vec::new();
    }
    let span = u64::from(days - 1);
    let start = reference.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
    start
        .iter_days()
        .take_while(|d| *d <= reference)
        .map(|d| summarize(d, records, catalog))
        .collect()
}
