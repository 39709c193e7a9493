//! Route definitions for the `/habits` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::habits;
use crate::state::AppState;

/// Routes mounted at `/habits`.
///
/// ```text
/// GET  /                -> list
/// POST /                -> create
/// GET  /{id}            -> get_by_id
/// POST /{id}/progress   -> record_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(habits::list).post(habits::create))
        .route("/{id}", get(habits::get_by_id))
        .route("/{id}/progress", post(habits::record_progress))
}
