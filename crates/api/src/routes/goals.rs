//! Route definitions for the `/goals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::goals;
use crate::state::AppState;

/// Routes mounted at `/goals`.
///
/// ```text
/// GET  /                -> list
/// POST /                -> create
/// GET  /{id}            -> get_by_id
/// POST /{id}/progress   -> record_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(goals::list).post(goals::create))
        .route("/{id}", get(goals::get_by_id))
        .route("/{id}/progress", post(goals::record_progress))
}
