//! Trackable item row model.

use habitcat_core::error::CoreError;
use habitcat_core::item::{ItemKind, Recurrence, TrackableItem};
use habitcat_core::period::Period;
use habitcat_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `trackable_items` table.
///
/// `kind`, `period` and `start_at` are stored flat; [`TrackableItem`] folds
/// them into a single [`Recurrence`].
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub id: DbId,
    pub account_id: Option<DbId>,
    pub kind: String,
    pub description: String,
    pub todo: i32,
    pub period: Option<String>,
    pub start_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
}

impl TryFrom<ItemRow> for TrackableItem {
    type Error = CoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let recurrence = match ItemKind::from_str_value(&row.kind)? {
            ItemKind::Goal => Recurrence::Lifetime,
            ItemKind::Habit => {
                let period = row.period.as_deref().ok_or_else(|| {
                    CoreError::Internal(format!("Habit {} has no period", row.id))
                })?;
                Recurrence::Periodic {
                    period: Period::from_str_value(period)?,
                    start: row.start_at.unwrap_or(row.created_at),
                }
            }
        };

        Ok(TrackableItem {
            id: row.id,
            account_id: row.account_id,
            description: row.description,
            todo: row.todo,
            recurrence,
            expires_at: row.expires_at,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}
