//! Handlers for the `/items` resource.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use habitcat_core::item::ItemView;

use crate::error::AppResult;
use crate::middleware::auth::AccountScope;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/items
///
/// Every goal and habit visible to the caller with its current progress, in
/// no particular order.
pub async fn list(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
) -> AppResult<Json<DataResponse<Vec<ItemView>>>> {
    let items = state.engine.list_items(scope, Utc::now()).await?;
    Ok(Json(DataResponse { data: items }))
}
