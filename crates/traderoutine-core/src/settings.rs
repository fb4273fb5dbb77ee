//! User-facing toggles persisted alongside the records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default)]
    pub dark_mode: bool,
    /// When false, Saturdays and Sundays neither count toward nor break a streak.
    #[serde(default = "default_true")]
    pub weekend_included: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminder_enabled: false,
            dark_mode: false,
            weekend_included: true,
        }
    }
}
