//! Trackable items: one-shot goals and recurring habits.
//!
//! Both variants share one row shape and one progress contract. They differ
//! only in which ledger entries count towards `done`: a goal counts its whole
//! history, a habit only the entries inside the period window containing
//! "now".

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::period::{Period, PeriodWindow};
use crate::progress::pct_done;
use crate::store::ProgressLedger;
use crate::types::{DbId, Timestamp};

pub const KIND_GOAL: &str = "goal";
pub const KIND_HABIT: &str = "habit";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Discriminant stored in `trackable_items.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Goal,
    Habit,
}

impl ItemKind {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            KIND_GOAL => Ok(Self::Goal),
            KIND_HABIT => Ok(Self::Habit),
            _ => Err(CoreError::Validation(format!("Invalid item kind '{s}'"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goal => KIND_GOAL,
            Self::Habit => KIND_HABIT,
        }
    }

    /// Entity name used in `NotFound` errors.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Goal => "Goal",
            Self::Habit => "Habit",
        }
    }
}

/// Which ledger entries count towards an item's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    /// Every entry ever appended (goals).
    Lifetime,
    /// Only entries inside the current window of `period` (habits).
    Periodic { period: Period, start: Timestamp },
}

// ---------------------------------------------------------------------------
// TrackableItem
// ---------------------------------------------------------------------------

/// A stored goal or habit. Progress is not part of the item; it is derived
/// from the ledger on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackableItem {
    pub id: DbId,
    /// Owning account; `None` for items created without an account scope.
    pub account_id: Option<DbId>,
    pub description: String,
    /// Target points, always positive.
    pub todo: i32,
    pub recurrence: Recurrence,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
}

impl TrackableItem {
    pub fn kind(&self) -> ItemKind {
        match self.recurrence {
            Recurrence::Lifetime => ItemKind::Goal,
            Recurrence::Periodic { .. } => ItemKind::Habit,
        }
    }

    pub fn period(&self) -> Option<Period> {
        match self.recurrence {
            Recurrence::Lifetime => None,
            Recurrence::Periodic { period, .. } => Some(period),
        }
    }

    /// The ledger range that counts at `now`, or `None` for the full history.
    pub fn tally_window(&self, now: Timestamp) -> Option<PeriodWindow> {
        self.period().map(|period| period.current_window(now))
    }

    /// Sum the ledger entries that count towards this item at `now`.
    pub async fn compute_done<L: ProgressLedger>(
        &self,
        ledger: &L,
        now: Timestamp,
    ) -> Result<i64, CoreError> {
        match self.tally_window(now) {
            Some(window) => ledger.sum_in_range(self.id, &window).await,
            None => ledger.sum_all(self.id).await,
        }
    }

    /// Short human-readable summary, e.g. `"Run: 3 per week"`.
    pub fn describe(&self) -> String {
        match self.period() {
            Some(period) => format!("{}: {} per {period}", self.description, self.todo),
            None => format!("{}: {} points", self.description, self.todo),
        }
    }

    /// Annotate this item with an already computed `done` value.
    pub fn view(&self, done: i64) -> ItemView {
        let (period, start) = match self.recurrence {
            Recurrence::Lifetime => (None, None),
            Recurrence::Periodic { period, start } => (Some(period), Some(start)),
        };
        ItemView {
            id: self.id,
            kind: self.kind(),
            description: self.description.clone(),
            done,
            total: self.todo,
            pct_done: pct_done(done, i64::from(self.todo)),
            period,
            start,
            expires_at: self.expires_at,
            last_modified: self.modified_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Creation input
// ---------------------------------------------------------------------------

/// Unvalidated creation input, as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItem {
    pub description: String,
    /// Target points.
    pub todo: i32,
    /// `"week"` or `"month"` for habits; absent for goals.
    pub period: Option<String>,
    /// Habit start; defaults to the creation time.
    pub start: Option<Timestamp>,
    /// Optional deadline, goals only.
    pub expires_at: Option<Timestamp>,
}

/// Creation input that passed validation and can be written as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    pub description: String,
    pub todo: i32,
    pub recurrence: Recurrence,
    pub expires_at: Option<Timestamp>,
}

impl ValidatedItem {
    pub fn kind(&self) -> ItemKind {
        match self.recurrence {
            Recurrence::Lifetime => ItemKind::Goal,
            Recurrence::Periodic { .. } => ItemKind::Habit,
        }
    }
}

impl NewItem {
    pub fn goal(description: impl Into<String>, todo: i32) -> Self {
        Self {
            description: description.into(),
            todo,
            ..Self::default()
        }
    }

    pub fn habit(description: impl Into<String>, todo: i32, period: &str) -> Self {
        Self {
            description: description.into(),
            todo,
            period: Some(period.to_string()),
            ..Self::default()
        }
    }

    /// Check the input and resolve defaults relative to `now`.
    pub fn validate(&self, now: Timestamp) -> Result<ValidatedItem, CoreError> {
        if self.todo <= 0 {
            return Err(CoreError::Validation(format!(
                "Target points must be positive, got {}",
                self.todo
            )));
        }

        let recurrence = match &self.period {
            Some(raw) => Recurrence::Periodic {
                period: Period::from_str_value(raw)?,
                start: self.start.unwrap_or(now),
            },
            None => {
                if self.start.is_some() {
                    return Err(CoreError::Validation(
                        "A start date only applies to habits".into(),
                    ));
                }
                Recurrence::Lifetime
            }
        };

        if self.expires_at.is_some() && recurrence != Recurrence::Lifetime {
            return Err(CoreError::Validation("Only goals can expire".into()));
        }

        Ok(ValidatedItem {
            description: self.description.clone(),
            todo: self.todo,
            recurrence,
            expires_at: self.expires_at,
        })
    }
}

// ---------------------------------------------------------------------------
// ItemView
// ---------------------------------------------------------------------------

/// An item annotated with its progress as of one read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: DbId,
    pub kind: ItemKind,
    pub description: String,
    pub done: i64,
    pub total: i32,
    pub pct_done: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    pub last_modified: Timestamp,
}

impl ItemView {
    pub fn is_complete(&self) -> bool {
        self.pct_done >= crate::progress::MAX_PCT
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires| now > expires)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2016, 1, 13, 12, 0, 0).unwrap()
    }

    fn goal(todo: i32) -> TrackableItem {
        TrackableItem {
            id: 7,
            account_id: Some(1),
            description: "doc".into(),
            todo,
            recurrence: Recurrence::Lifetime,
            expires_at: None,
            created_at: now(),
            modified_at: now(),
        }
    }

    #[test]
    fn validate_goal() {
        let item = NewItem::goal("Read", 15).validate(now()).unwrap();
        assert_eq!(item.recurrence, Recurrence::Lifetime);
        assert_eq!(item.kind(), ItemKind::Goal);
    }

    #[test]
    fn validate_habit_defaults_start_to_now() {
        let item = NewItem::habit("Run", 3, "week").validate(now()).unwrap();
        assert_eq!(
            item.recurrence,
            Recurrence::Periodic {
                period: Period::Week,
                start: now()
            }
        );
    }

    #[test]
    fn validate_rejects_non_positive_target() {
        assert_matches!(
            NewItem::goal("Read", 0).validate(now()),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            NewItem::habit("Run", -2, "week").validate(now()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn validate_rejects_unknown_period() {
        assert_matches!(
            NewItem::habit("Run", 3, "fortnight").validate(now()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn validate_rejects_expiring_habit() {
        let input = NewItem {
            expires_at: Some(now()),
            ..NewItem::habit("Run", 3, "month")
        };
        assert_matches!(input.validate(now()), Err(CoreError::Validation(_)));
    }

    #[test]
    fn goal_has_no_tally_window() {
        assert_eq!(goal(3).tally_window(now()), None);
        assert_eq!(goal(3).kind(), ItemKind::Goal);
    }

    #[test]
    fn habit_tally_window_follows_period() {
        let habit = TrackableItem {
            recurrence: Recurrence::Periodic {
                period: Period::Week,
                start: now(),
            },
            ..goal(2)
        };
        let window = habit.tally_window(now()).unwrap();
        assert_eq!(window, Period::Week.current_window(now()));
        assert_eq!(habit.kind(), ItemKind::Habit);
        assert_eq!(habit.describe(), "doc: 2 per week");
    }

    #[test]
    fn view_computes_percentage() {
        let view = goal(15).view(3);
        assert_eq!(view.done, 3);
        assert_eq!(view.total, 15);
        assert_eq!(view.pct_done, 20);
        assert!(!view.is_complete());
        assert_eq!(view.period, None);
    }

    #[test]
    fn view_expiry() {
        let mut item = goal(2);
        item.expires_at = Some(now());
        let view = item.view(0);
        assert!(!view.is_expired(now()));
        assert!(view.is_expired(now() + chrono::Duration::seconds(1)));
    }

    #[test]
    fn view_json_omits_habit_fields_for_goals() {
        let json = serde_json::to_value(goal(4).view(1)).unwrap();
        assert_eq!(json["kind"], "goal");
        assert_eq!(json["pct_done"], 25);
        assert!(json.get("period").is_none());
    }
}
