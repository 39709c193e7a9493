//! Presentation helpers layered on top of the engine's unordered item list.
//!
//! The goal page splits items into "in progress" and "done", newest activity
//! first. The habit page shows the combined progress of all habits together
//! with the current ISO week number.

use serde::Serialize;

use crate::item::ItemView;
use crate::period::current_week_number;
use crate::progress::pct_done;
use crate::types::Timestamp;

/// Items split by completion, each half ordered by `last_modified` descending.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Board {
    pub in_progress: Vec<ItemView>,
    /// Completed or expired items.
    pub done: Vec<ItemView>,
}

impl Board {
    pub fn partition(views: Vec<ItemView>, now: Timestamp) -> Self {
        let (mut done, mut in_progress): (Vec<_>, Vec<_>) = views
            .into_iter()
            .partition(|v| v.is_complete() || v.is_expired(now));
        sort_recent_first(&mut in_progress);
        sort_recent_first(&mut done);
        Self { in_progress, done }
    }
}

fn sort_recent_first(views: &mut [ItemView]) {
    views.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
}

/// Combined progress of a set of items for the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub done: i64,
    pub todo: i64,
    pub pct_done: i32,
    pub week_number: u32,
}

impl PeriodTotals {
    pub fn from_views(views: &[ItemView], now: Timestamp) -> Self {
        let done: i64 = views.iter().map(|v| v.done).sum();
        let todo: i64 = views.iter().map(|v| i64::from(v.total)).sum();
        Self {
            done,
            todo,
            pct_done: pct_done(done, todo),
            week_number: current_week_number(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::item::{ItemKind, ItemView};
    use crate::period::Period;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2016, 1, 11, 23, 0, 0).unwrap()
    }

    fn view(id: i64, done: i64, total: i32, age_hours: i64) -> ItemView {
        ItemView {
            id,
            kind: ItemKind::Goal,
            description: format!("item {id}"),
            done,
            total,
            pct_done: pct_done(done, i64::from(total)),
            period: None,
            start: None,
            expires_at: None,
            last_modified: now() - Duration::hours(age_hours),
        }
    }

    #[test]
    fn partition_splits_and_orders() {
        let board = Board::partition(
            vec![
                view(1, 0, 5, 10),
                view(2, 5, 5, 3),
                view(3, 1, 5, 1),
                view(4, 9, 5, 7),
            ],
            now(),
        );

        let in_progress: Vec<_> = board.in_progress.iter().map(|v| v.id).collect();
        let done: Vec<_> = board.done.iter().map(|v| v.id).collect();
        assert_eq!(in_progress, vec![3, 1]);
        assert_eq!(done, vec![2, 4]);
    }

    #[test]
    fn expired_items_count_as_done() {
        let mut expired = view(1, 0, 5, 2);
        expired.expires_at = Some(now() - Duration::hours(1));
        let board = Board::partition(vec![expired], now());
        assert!(board.in_progress.is_empty());
        assert_eq!(board.done.len(), 1);
    }

    #[test]
    fn totals_sum_done_and_todo() {
        let mut habit = view(1, 1, 2, 0);
        habit.kind = ItemKind::Habit;
        habit.period = Some(Period::Week);

        let totals = PeriodTotals::from_views(&[habit, view(2, 0, 2, 0)], now());
        assert_eq!(totals.done, 1);
        assert_eq!(totals.todo, 4);
        assert_eq!(totals.pct_done, 25);
        assert_eq!(totals.week_number, 2);
    }

    #[test]
    fn totals_of_nothing_are_zero() {
        let totals = PeriodTotals::from_views(&[], now());
        assert_eq!(totals.pct_done, 0);
        assert_eq!(totals.todo, 0);
    }
}
