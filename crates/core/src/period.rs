//! Recurrence periods and the clock that computes their current window.
//!
//! All boundaries are evaluated in UTC. A window is half-open: it contains
//! `start` and excludes `end`, so consecutive windows never overlap.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const PERIOD_WEEK: &str = "week";
pub const PERIOD_MONTH: &str = "month";

/// All valid period strings, as stored in `trackable_items.period`.
pub const VALID_PERIODS: &[&str] = &[PERIOD_WEEK, PERIOD_MONTH];

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// How often a habit's progress resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
}

impl Period {
    /// Convert from a database or request string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            PERIOD_WEEK => Ok(Self::Week),
            PERIOD_MONTH => Ok(Self::Month),
            _ => Err(CoreError::Validation(format!(
                "Invalid period '{s}'. Must be one of: {}",
                VALID_PERIODS.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => PERIOD_WEEK,
            Self::Month => PERIOD_MONTH,
        }
    }

    /// The window of this period that contains `now`.
    ///
    /// Weeks start on Monday (ISO 8601), months on their first day, both at
    /// midnight UTC.
    pub fn current_window(&self, now: Timestamp) -> PeriodWindow {
        let today = now.date_naive();
        match self {
            Self::Week => {
                let back = u64::from(today.weekday().num_days_from_monday());
                let start = today - Days::new(back);
                PeriodWindow {
                    start: midnight(start),
                    end: midnight(start + Days::new(7)),
                }
            }
            Self::Month => {
                let start = today - Days::new(u64::from(today.day0()));
                PeriodWindow {
                    start: midnight(start),
                    end: midnight(start + Months::new(1)),
                }
            }
        }
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_value(s)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PeriodWindow
// ---------------------------------------------------------------------------

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl PeriodWindow {
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts < self.end
    }
}

/// ISO 8601 week number of `now`.
pub fn current_week_number(now: Timestamp) -> u32 {
    now.iso_week().week()
}

fn midnight(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
