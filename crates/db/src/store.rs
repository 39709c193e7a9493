//! PostgreSQL implementation of the engine's storage capability.

use habitcat_core::error::CoreError;
use habitcat_core::item::{TrackableItem, ValidatedItem};
use habitcat_core::period::PeriodWindow;
use habitcat_core::store::{ItemStore, ProgressLedger};
use habitcat_core::types::{DbId, Timestamp};

use crate::repositories::{ItemRepo, ProgressRepo};
use crate::DbPool;

/// [`ItemStore`] backed by a PostgreSQL pool.
///
/// Increments on one item are serialized by a row lock on the item
/// (`SELECT ... FOR UPDATE`) held for the whole append-then-tally
/// transaction. Increments on different items lock different rows.
#[derive(Debug, Clone)]
pub struct PgProgressStore {
    pool: DbPool,
}

impl PgProgressStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Storage failures surface as opaque internal errors.
fn internal(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Progress store query failed");
    CoreError::Internal(format!("Database error: {err}"))
}

impl ProgressLedger for PgProgressStore {
    async fn append(&self, item_id: DbId, delta: i32, at: Timestamp) -> Result<DbId, CoreError> {
        let entry = ProgressRepo::append(&self.pool, item_id, delta, at)
            .await
            .map_err(internal)?;
        Ok(entry.id)
    }

    async fn sum_in_range(&self, item_id: DbId, window: &PeriodWindow) -> Result<i64, CoreError> {
        ProgressRepo::sum_in_range(&self.pool, item_id, window)
            .await
            .map_err(internal)
    }

    async fn sum_all(&self, item_id: DbId) -> Result<i64, CoreError> {
        ProgressRepo::sum_all(&self.pool, item_id)
            .await
            .map_err(internal)
    }
}

impl ItemStore for PgProgressStore {
    async fn insert_item(
        &self,
        owner: Option<DbId>,
        item: &ValidatedItem,
        now: Timestamp,
    ) -> Result<DbId, CoreError> {
        let row = ItemRepo::create(&self.pool, owner, item, now)
            .await
            .map_err(internal)?;
        Ok(row.id)
    }

    async fn find_item(
        &self,
        id: DbId,
        scope: Option<DbId>,
    ) -> Result<Option<TrackableItem>, CoreError> {
        ItemRepo::find_scoped(&self.pool, id, scope)
            .await
            .map_err(internal)?
            .map(TrackableItem::try_from)
            .transpose()
    }

    async fn list_items(&self, scope: Option<DbId>) -> Result<Vec<TrackableItem>, CoreError> {
        ItemRepo::list_scoped(&self.pool, scope)
            .await
            .map_err(internal)?
            .into_iter()
            .map(TrackableItem::try_from)
            .collect()
    }

    async fn record_progress(
        &self,
        id: DbId,
        scope: Option<DbId>,
        delta: i32,
        now: Timestamp,
    ) -> Result<Option<(TrackableItem, i64)>, CoreError> {
        let mut tx = self.pool.begin().await.map_err(internal)?;

        // Dropping `tx` without commit rolls back, so every early return
        // below leaves no ledger entry behind.
        let Some(row) = ItemRepo::lock_scoped(&mut *tx, id, scope)
            .await
            .map_err(internal)?
        else {
            return Ok(None);
        };
        let mut item = TrackableItem::try_from(row)?;

        let entry = ProgressRepo::append(&mut *tx, id, delta, now)
            .await
            .map_err(internal)?;
        item.modified_at = ItemRepo::touch(&mut *tx, id, now)
            .await
            .map_err(internal)?;

        let done = match item.tally_window(now) {
            Some(window) => ProgressRepo::sum_in_range(&mut *tx, id, &window).await,
            None => ProgressRepo::sum_all(&mut *tx, id).await,
        }
        .map_err(internal)?;

        tx.commit().await.map_err(internal)?;
        tracing::debug!(item_id = id, entry_id = entry.id, done, "Appended progress entry");

        Ok(Some((item, done)))
    }
}
