//! Per-day check-in records.
//!
//! A [`DayRecord`] holds everything the user entered for one calendar date:
//! the checked option ids, the closing one-line recap and the mood. Records
//! are owned by the storage layer and handed to the core by value.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// ISO calendar date format used for record keys.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// How the day felt, picked in the closing reflection module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Smooth,
    Normal,
    Tired,
    Annoyed,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Smooth, Mood::Normal, Mood::Tired, Mood::Annoyed];

    /// Stable storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Smooth => "smooth",
            Mood::Normal => "normal",
            Mood::Tired => "tired",
            Mood::Annoyed => "annoyed",
        }
    }

    /// Short label shown next to the mood picker.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Smooth => "顺",
            Mood::Normal => "一般",
            Mood::Tired => "累",
            Mood::Annoyed => "烦",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    /// Accepts the storage name (case-insensitive) or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed) || m.label() == trimmed)
            .ok_or_else(|| ValidationError::UnknownMood(s.to_string()))
    }
}

/// Everything recorded for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    /// Checked task/option ids. Unique and unordered; a `BTreeSet` keeps
    /// serialized output stable.
    #[serde(default)]
    pub completed: BTreeSet<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
}

impl DayRecord {
    /// A record with nothing checked, equivalent to no record at all.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            completed: BTreeSet::new(),
            note: None,
            mood: None,
        }
    }

    pub fn date_key(&self) -> String {
        date_key(self.date)
    }

    pub fn is_checked(&self, option_id: &str) -> bool {
        self.completed.contains(option_id)
    }

    /// True when the recap contains something other than whitespace.
    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    pub fn has_mood(&self) -> bool {
        self.mood.is_some()
    }

    /// No checks, no note, no mood.
    pub fn is_blank(&self) -> bool {
        self.completed.is_empty() && !self.has_note() && !self.has_mood()
    }

    /// Flip an option and return its new checked state.
    pub fn toggle(&mut self, option_id: &str) -> bool {
        if self.completed.remove(option_id) {
            false
        } else {
            self.completed.insert(option_id.to_string());
            true
        }
    }

    pub fn set_checked(&mut self, option_id: &str, checked: bool) {
        if checked {
            self.completed.insert(option_id.to_string());
        } else {
            self.completed.remove(option_id);
        }
    }

    /// Store the recap text; blank input clears it.
    pub fn set_note(&mut self, text: &str) {
        let trimmed = text.trim();
        self.note = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn set_mood(&mut self, mood: Option<Mood>) {
        self.mood = mood;
    }
}

/// Format a date as its record key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` record key.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(key.to_string()))
}
