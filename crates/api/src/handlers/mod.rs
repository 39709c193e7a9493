pub mod auth;
pub mod goals;
pub mod habits;
pub mod items;

use chrono::Utc;
use habitcat_core::error::CoreError;
use habitcat_core::item::{ItemKind, ItemView};
use habitcat_core::store::ItemStore;
use habitcat_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Fetch one item of `kind` visible under `scope`.
///
/// Missing, foreign and wrong-kind items all produce the same `NotFound`.
pub(crate) async fn get_of_kind(
    state: &AppState,
    id: DbId,
    scope: Option<DbId>,
    kind: ItemKind,
) -> AppResult<ItemView> {
    let view = state
        .engine
        .get_item(id, scope, Utc::now())
        .await
        .map_err(|e| as_kind_error(e, kind))?;
    if view.kind != kind {
        return Err(not_found(kind, id));
    }
    Ok(view)
}

/// Add one point to an item of `kind` visible under `scope`.
///
/// The kind is checked before the increment, so a wrong-kind request writes
/// nothing.
pub(crate) async fn record_of_kind(
    state: &AppState,
    id: DbId,
    scope: Option<DbId>,
    kind: ItemKind,
) -> AppResult<ItemView> {
    let item = state
        .engine
        .store()
        .find_item(id, scope)
        .await?
        .filter(|item| item.kind() == kind)
        .ok_or_else(|| not_found(kind, id))?;

    state
        .engine
        .record_progress(item.id, scope, Utc::now())
        .await
        .map_err(|e| as_kind_error(e, kind))
}

/// All items of `kind` visible under `scope`.
pub(crate) async fn list_of_kind(
    state: &AppState,
    scope: Option<DbId>,
    kind: ItemKind,
) -> AppResult<Vec<ItemView>> {
    let views = state.engine.list_items(scope, Utc::now()).await?;
    Ok(views.into_iter().filter(|v| v.kind == kind).collect())
}

fn not_found(kind: ItemKind, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: kind.entity(),
        id,
    })
}

/// Report engine `NotFound` errors under the route's entity name.
fn as_kind_error(err: CoreError, kind: ItemKind) -> AppError {
    match err {
        CoreError::NotFound { id, .. } => not_found(kind, id),
        other => AppError::Core(other),
    }
}
