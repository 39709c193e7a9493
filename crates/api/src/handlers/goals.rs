//! Handlers for the `/goals` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use habitcat_core::board::Board;
use habitcat_core::item::{ItemKind, ItemView, NewItem};
use habitcat_core::types::{DbId, Timestamp};
use serde::Deserialize;

use super::{get_of_kind, list_of_kind, record_of_kind};
use crate::error::AppResult;
use crate::middleware::auth::AccountScope;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /goals`.
#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub description: String,
    /// Target points.
    pub todo: i32,
    pub expires_at: Option<Timestamp>,
}

/// GET /api/v1/goals
///
/// Goals split into in-progress and done (or expired), most recently
/// modified first.
pub async fn list(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
) -> AppResult<Json<DataResponse<Board>>> {
    let goals = list_of_kind(&state, scope, ItemKind::Goal).await?;
    Ok(Json(DataResponse {
        data: Board::partition(goals, Utc::now()),
    }))
}

/// POST /api/v1/goals
pub async fn create(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
    Json(input): Json<CreateGoalRequest>,
) -> AppResult<(StatusCode, Json<ItemView>)> {
    let new_item = NewItem {
        description: input.description,
        todo: input.todo,
        expires_at: input.expires_at,
        ..NewItem::default()
    };
    let now = Utc::now();
    let id = state.engine.create_item(scope, &new_item, now).await?;
    let goal = state.engine.get_item(id, scope, now).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /api/v1/goals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<ItemView>> {
    let goal = get_of_kind(&state, id, scope, ItemKind::Goal).await?;
    Ok(Json(goal))
}

/// POST /api/v1/goals/{id}/progress
///
/// Adds one point and returns the updated goal.
pub async fn record_progress(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<ItemView>> {
    let goal = record_of_kind(&state, id, scope, ItemKind::Goal).await?;
    Ok(Json(goal))
}
