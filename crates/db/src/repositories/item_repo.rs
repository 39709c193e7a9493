//! Repository for the `trackable_items` table.
//!
//! Every lookup takes an optional account scope. `None` sees all rows;
//! `Some(id)` only rows owned by that account.

use habitcat_core::item::{Recurrence, ValidatedItem};
use habitcat_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::item::ItemRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, kind, description, todo, period, start_at, \
                       expires_at, created_at, modified_at";

/// Scope predicate bound to `$2` in scoped lookups.
const SCOPE_FILTER: &str = "($2::BIGINT IS NULL OR account_id = $2)";

/// Provides create and scoped lookup operations for goals and habits.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item owned by `owner`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner: Option<DbId>,
        input: &ValidatedItem,
        now: Timestamp,
    ) -> Result<ItemRow, sqlx::Error> {
        let (period, start_at) = match input.recurrence {
            Recurrence::Lifetime => (None, None),
            Recurrence::Periodic { period, start } => (Some(period.as_str()), Some(start)),
        };
        let query = format!(
            "INSERT INTO trackable_items
                (account_id, kind, description, todo, period, start_at, expires_at,
                 created_at, modified_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(owner)
            .bind(input.kind().as_str())
            .bind(&input.description)
            .bind(input.todo)
            .bind(period)
            .bind(start_at)
            .bind(input.expires_at)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find an item by ID if it is visible under `scope`.
    pub async fn find_scoped(
        pool: &PgPool,
        id: DbId,
        scope: Option<DbId>,
    ) -> Result<Option<ItemRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM trackable_items WHERE id = $1 AND {SCOPE_FILTER}");
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(id)
            .bind(scope)
            .fetch_optional(pool)
            .await
    }

    /// List every item visible under `scope`, most recently modified first.
    pub async fn list_scoped(
        pool: &PgPool,
        scope: Option<DbId>,
    ) -> Result<Vec<ItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trackable_items \
             WHERE ($1::BIGINT IS NULL OR account_id = $1) \
             ORDER BY modified_at DESC, id DESC"
        );
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(scope)
            .fetch_all(pool)
            .await
    }

    /// Lock an item row for the rest of the surrounding transaction.
    ///
    /// Concurrent callers locking the same row wait until the holder commits
    /// or rolls back. Returns `None` if the item is not visible under `scope`.
    pub async fn lock_scoped<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        scope: Option<DbId>,
    ) -> Result<Option<ItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trackable_items WHERE id = $1 AND {SCOPE_FILTER} FOR UPDATE"
        );
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(id)
            .bind(scope)
            .fetch_optional(executor)
            .await
    }

    /// Set `modified_at` to `at`, returning the value as stored.
    ///
    /// `TIMESTAMPTZ` keeps microseconds, so the stored value may be coarser
    /// than `at`.
    pub async fn touch<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        at: Timestamp,
    ) -> Result<Timestamp, sqlx::Error> {
        let (modified_at,): (Timestamp,) = sqlx::query_as(
            "UPDATE trackable_items SET modified_at = $2 WHERE id = $1 RETURNING modified_at",
        )
        .bind(id)
        .bind(at)
        .fetch_one(executor)
        .await?;
        Ok(modified_at)
    }
}
