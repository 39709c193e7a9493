//! The progress engine: the only entry point for reading and mutating
//! goal/habit progress.
//!
//! Every operation takes the account scope and the reference instant `now`
//! explicitly. Nothing is cached between calls; each read recomputes progress
//! from the ledger.

use crate::error::CoreError;
use crate::item::{ItemView, NewItem};
use crate::store::ItemStore;
use crate::types::{DbId, Timestamp};

/// Points added by one [`ProgressEngine::record_progress`] call.
pub const PROGRESS_DELTA: i32 = 1;

/// Entity name reported by `NotFound` errors raised by the engine.
const ITEM_ENTITY: &str = "Item";

/// Progress engine over a storage capability `S`.
#[derive(Debug, Clone)]
pub struct ProgressEngine<S> {
    store: S,
}

impl<S: ItemStore> ProgressEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every item visible to `scope`, annotated with its progress at `now`.
    ///
    /// The order of the returned list is unspecified.
    pub async fn list_items(
        &self,
        scope: Option<DbId>,
        now: Timestamp,
    ) -> Result<Vec<ItemView>, CoreError> {
        let items = self.store.list_items(scope).await?;
        let mut views = Vec::with_capacity(items.len());
        for item in &items {
            let done = item.compute_done(&self.store, now).await?;
            views.push(item.view(done));
        }
        Ok(views)
    }

    /// One item with its progress at `now`.
    ///
    /// An item owned by another account is reported exactly like a missing
    /// one.
    pub async fn get_item(
        &self,
        id: DbId,
        scope: Option<DbId>,
        now: Timestamp,
    ) -> Result<ItemView, CoreError> {
        let item = self
            .store
            .find_item(id, scope)
            .await?
            .ok_or(CoreError::NotFound {
                entity: ITEM_ENTITY,
                id,
            })?;
        let done = item.compute_done(&self.store, now).await?;
        Ok(item.view(done))
    }

    /// Validate `input` and write a new item owned by `owner`.
    ///
    /// Invalid input is rejected before anything is written.
    pub async fn create_item(
        &self,
        owner: Option<DbId>,
        input: &NewItem,
        now: Timestamp,
    ) -> Result<DbId, CoreError> {
        let item = input.validate(now)?;
        let id = self.store.insert_item(owner, &item, now).await?;
        tracing::info!(
            item_id = id,
            account_id = ?owner,
            kind = item.kind().as_str(),
            todo = item.todo,
            "Created trackable item",
        );
        Ok(id)
    }

    /// Add one point to an item and return its updated view.
    ///
    /// The returned `done` includes exactly the entries appended up to and
    /// including this call.
    pub async fn record_progress(
        &self,
        id: DbId,
        scope: Option<DbId>,
        now: Timestamp,
    ) -> Result<ItemView, CoreError> {
        let (item, done) = self
            .store
            .record_progress(id, scope, PROGRESS_DELTA, now)
            .await?
            .ok_or(CoreError::NotFound {
                entity: ITEM_ENTITY,
                id,
            })?;
        let view = item.view(done);
        tracing::info!(
            item_id = id,
            item = %item.describe(),
            done = view.done,
            pct_done = view.pct_done,
            "Recorded progress",
        );
        Ok(view)
    }
}
