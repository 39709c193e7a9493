use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(items::list))
}
