//! Repository for the append-only `progress_entries` table.

use habitcat_core::period::PeriodWindow;
use habitcat_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::progress_entry::ProgressEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, item_id, delta, created_at";

/// Appends and sums progress entries. Entries are never updated or deleted.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Append one entry timestamped `at`, returning the created row.
    pub async fn append<'e>(
        executor: impl PgExecutor<'e>,
        item_id: DbId,
        delta: i32,
        at: Timestamp,
    ) -> Result<ProgressEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress_entries (item_id, delta, created_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressEntry>(&query)
            .bind(item_id)
            .bind(delta)
            .bind(at)
            .fetch_one(executor)
            .await
    }

    /// Sum of deltas created inside `[window.start, window.end)`. `0` when empty.
    pub async fn sum_in_range<'e>(
        executor: impl PgExecutor<'e>,
        item_id: DbId,
        window: &PeriodWindow,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(delta), 0)::BIGINT FROM progress_entries \
             WHERE item_id = $1 AND created_at >= $2 AND created_at < $3",
        )
        .bind(item_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    /// Sum of every delta for the item. `0` when it has no entries.
    pub async fn sum_all<'e>(
        executor: impl PgExecutor<'e>,
        item_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(delta), 0)::BIGINT FROM progress_entries WHERE item_id = $1",
        )
        .bind(item_id)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }
}
