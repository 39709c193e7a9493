pub mod auth;
pub mod goals;
pub mod habits;
pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                  create account (public)
/// /auth/login                   login (public)
/// /auth/me                      current account (requires auth)
///
/// /items                        every visible goal and habit
///
/// /goals                        board, create
/// /goals/{id}                   get
/// /goals/{id}/progress          add one point (POST)
///
/// /habits                       list with period totals, create
/// /habits/{id}                  get
/// /habits/{id}/progress         add one point (POST)
/// ```
///
/// Item routes require a Bearer token unless the server runs in anonymous
/// mode.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/items", items::router())
        .nest("/goals", goals::router())
        .nest("/habits", habits::router())
}
