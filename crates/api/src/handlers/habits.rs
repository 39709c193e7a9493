//! Handlers for the `/habits` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use habitcat_core::board::PeriodTotals;
use habitcat_core::item::{ItemKind, ItemView, NewItem};
use habitcat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use super::{get_of_kind, list_of_kind, record_of_kind};
use crate::error::AppResult;
use crate::middleware::auth::AccountScope;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /habits`.
#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub description: String,
    /// Target points per period.
    pub todo: i32,
    /// `"week"` or `"month"`.
    pub period: String,
    /// Defaults to now.
    pub start: Option<Timestamp>,
}

/// Payload of `GET /habits`.
#[derive(Debug, Serialize)]
pub struct HabitOverview {
    pub habits: Vec<ItemView>,
    /// Combined progress of all habits in their current periods.
    pub totals: PeriodTotals,
}

/// GET /api/v1/habits
pub async fn list(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
) -> AppResult<Json<DataResponse<HabitOverview>>> {
    let mut habits = list_of_kind(&state, scope, ItemKind::Habit).await?;
    habits.sort_by_key(|h| h.id);
    let totals = PeriodTotals::from_views(&habits, Utc::now());
    Ok(Json(DataResponse {
        data: HabitOverview { habits, totals },
    }))
}

/// POST /api/v1/habits
pub async fn create(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
    Json(input): Json<CreateHabitRequest>,
) -> AppResult<(StatusCode, Json<ItemView>)> {
    let new_item = NewItem {
        description: input.description,
        todo: input.todo,
        period: Some(input.period),
        start: input.start,
        expires_at: None,
    };
    let now = Utc::now();
    let id = state.engine.create_item(scope, &new_item, now).await?;
    let habit = state.engine.get_item(id, scope, now).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

/// GET /api/v1/habits/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<ItemView>> {
    let habit = get_of_kind(&state, id, scope, ItemKind::Habit).await?;
    Ok(Json(habit))
}

/// POST /api/v1/habits/{id}/progress
///
/// Adds one point to the current period and returns the updated habit.
pub async fn record_progress(
    State(state): State<AppState>,
    AccountScope(scope): AccountScope,
    Path(id): Path<DbId>,
) -> AppResult<Json<ItemView>> {
    let habit = record_of_kind(&state, id, scope, ItemKind::Habit).await?;
    Ok(Json(habit))
}
