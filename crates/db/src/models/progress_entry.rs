//! Progress ledger entry model.

use habitcat_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the append-only `progress_entries` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProgressEntry {
    pub id: DbId,
    pub item_id: DbId,
    pub delta: i32,
    pub created_at: Timestamp,
}
