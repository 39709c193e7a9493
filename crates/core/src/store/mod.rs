//! Storage capability consumed by the progress engine.
//!
//! The engine never talks to a database directly. It is constructed with a
//! value implementing [`ItemStore`], which `habitcat-db` provides for
//! PostgreSQL and [`MemoryStore`] provides in-process.

mod memory;

use std::future::Future;

pub use memory::MemoryStore;

use crate::error::CoreError;
use crate::item::{TrackableItem, ValidatedItem};
use crate::period::PeriodWindow;
use crate::types::{DbId, Timestamp};

/// Append-only history of point deltas per item.
///
/// Sums over empty ranges (or unknown items) are `0`, never an error.
pub trait ProgressLedger: Send + Sync {
    /// Append one entry timestamped `at`. Returns the entry id.
    fn append(
        &self,
        item_id: DbId,
        delta: i32,
        at: Timestamp,
    ) -> impl Future<Output = Result<DbId, CoreError>> + Send;

    /// Sum of deltas with `window.start <= created_at < window.end`.
    fn sum_in_range(
        &self,
        item_id: DbId,
        window: &PeriodWindow,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    /// Sum of every delta ever appended for the item.
    fn sum_all(&self, item_id: DbId) -> impl Future<Output = Result<i64, CoreError>> + Send;
}

/// Item rows plus the atomic increment used by the engine.
///
/// `scope` is the requesting account. `None` means global visibility;
/// `Some(id)` restricts every lookup to items owned by `id`.
pub trait ItemStore: ProgressLedger {
    /// Write a new item row. Never writes ledger entries.
    fn insert_item(
        &self,
        owner: Option<DbId>,
        item: &ValidatedItem,
        now: Timestamp,
    ) -> impl Future<Output = Result<DbId, CoreError>> + Send;

    fn find_item(
        &self,
        id: DbId,
        scope: Option<DbId>,
    ) -> impl Future<Output = Result<Option<TrackableItem>, CoreError>> + Send;

    fn list_items(
        &self,
        scope: Option<DbId>,
    ) -> impl Future<Output = Result<Vec<TrackableItem>, CoreError>> + Send;

    /// Resolve the item under `scope`, append `delta` at `now`, bump its
    /// modification time and tally its progress at `now`, as one unit.
    ///
    /// Calls for the same item are serialized; calls for different items
    /// must not wait on each other. Returns `None` when the item is not
    /// visible under `scope`, in which case nothing is written.
    fn record_progress(
        &self,
        id: DbId,
        scope: Option<DbId>,
        delta: i32,
        now: Timestamp,
    ) -> impl Future<Output = Result<Option<(TrackableItem, i64)>, CoreError>> + Send;
}

/// Whether an item owned by `owner` is visible to a request scoped to `scope`.
pub fn is_visible(owner: Option<DbId>, scope: Option<DbId>) -> bool {
    match scope {
        None => true,
        Some(account_id) => owner == Some(account_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscoped_requests_see_everything() {
        assert!(is_visible(Some(1), None));
        assert!(is_visible(None, None));
    }

    #[test]
    fn scoped_requests_see_only_their_own() {
        assert!(is_visible(Some(1), Some(1)));
        assert!(!is_visible(Some(2), Some(1)));
        assert!(!is_visible(None, Some(1)));
    }
}
