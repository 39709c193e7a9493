//! In-process [`ItemStore`] backed by hash maps.
//!
//! Each item lives in its own slot behind an async mutex, so increments on
//! one item are serialized while other items proceed independently. The map
//! of slots is only write-locked while inserting a new item.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::{is_visible, ItemStore, ProgressLedger};
use crate::error::CoreError;
use crate::item::{TrackableItem, ValidatedItem};
use crate::period::PeriodWindow;
use crate::types::{DbId, Timestamp};

/// One appended ledger entry.
#[derive(Debug, Clone)]
struct LedgerEntry {
    delta: i32,
    created_at: Timestamp,
}

#[derive(Debug)]
struct Slot {
    item: TrackableItem,
    entries: Vec<LedgerEntry>,
}

impl Slot {
    fn sum_where(&self, keep: impl Fn(&LedgerEntry) -> bool) -> i64 {
        self.entries
            .iter()
            .filter(|e| keep(e))
            .map(|e| i64::from(e.delta))
            .sum()
    }

    fn tally(&self, now: Timestamp) -> i64 {
        match self.item.tally_window(now) {
            Some(window) => self.sum_where(|e| window.contains(e.created_at)),
            None => self.sum_where(|_| true),
        }
    }
}

/// Hash-map backed store. Cheap to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<DbId, Arc<Mutex<Slot>>>>,
    next_item_id: AtomicI64,
    next_entry_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, item_id: DbId) -> Option<Arc<Mutex<Slot>>> {
        self.slots.read().await.get(&item_id).cloned()
    }
}

impl ProgressLedger for MemoryStore {
    async fn append(&self, item_id: DbId, delta: i32, at: Timestamp) -> Result<DbId, CoreError> {
        let slot = self.slot(item_id).await.ok_or(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        })?;
        let mut slot = slot.lock().await;
        slot.entries.push(LedgerEntry {
            delta,
            created_at: at,
        });
        Ok(self.next_entry_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn sum_in_range(&self, item_id: DbId, window: &PeriodWindow) -> Result<i64, CoreError> {
        let Some(slot) = self.slot(item_id).await else {
            return Ok(0);
        };
        let slot = slot.lock().await;
        Ok(slot.sum_where(|e| window.contains(e.created_at)))
    }

    async fn sum_all(&self, item_id: DbId) -> Result<i64, CoreError> {
        let Some(slot) = self.slot(item_id).await else {
            return Ok(0);
        };
        let slot = slot.lock().await;
        Ok(slot.sum_where(|_| true))
    }
}

impl ItemStore for MemoryStore {
    async fn insert_item(
        &self,
        owner: Option<DbId>,
        item: &ValidatedItem,
        now: Timestamp,
    ) -> Result<DbId, CoreError> {
        let id = self.next_item_id.fetch_add(1, Ordering::Relaxed) + 1;
        let slot = Slot {
            item: TrackableItem {
                id,
                account_id: owner,
                description: item.description.clone(),
                todo: item.todo,
                recurrence: item.recurrence,
                expires_at: item.expires_at,
                created_at: now,
                modified_at: now,
            },
            entries: Vec::new(),
        };
        self.slots
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(slot)));
        Ok(id)
    }

    async fn find_item(
        &self,
        id: DbId,
        scope: Option<DbId>,
    ) -> Result<Option<TrackableItem>, CoreError> {
        let Some(slot) = self.slot(id).await else {
            return Ok(None);
        };
        let slot = slot.lock().await;
        Ok(is_visible(slot.item.account_id, scope).then(|| slot.item.clone()))
    }

    async fn list_items(&self, scope: Option<DbId>) -> Result<Vec<TrackableItem>, CoreError> {
        let slots: Vec<_> = self.slots.read().await.values().cloned().collect();
        let mut items = Vec::with_capacity(slots.len());
        for slot in slots {
            let slot = slot.lock().await;
            if is_visible(slot.item.account_id, scope) {
                items.push(slot.item.clone());
            }
        }
        Ok(items)
    }

    async fn record_progress(
        &self,
        id: DbId,
        scope: Option<DbId>,
        delta: i32,
        now: Timestamp,
    ) -> Result<Option<(TrackableItem, i64)>, CoreError> {
        let Some(slot) = self.slot(id).await else {
            return Ok(None);
        };
        let mut slot = slot.lock().await;
        if !is_visible(slot.item.account_id, scope) {
            return Ok(None);
        }

        slot.entries.push(LedgerEntry {
            delta,
            created_at: now,
        });
        self.next_entry_id.fetch_add(1, Ordering::Relaxed);
        slot.item.modified_at = now;

        let done = slot.tally(now);
        Ok(Some((slot.item.clone(), done)))
    }
}
