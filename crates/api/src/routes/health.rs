//! Liveness endpoint, mounted outside `/api/v1` so probes need no token.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `"ok"`, or `"degraded"` while PostgreSQL cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthReport {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
///
/// Always answers 200; a failing database only flips `db_healthy`.
async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = match habitcat_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };
    Json(HealthReport::new(db_healthy))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_database_is_degraded() {
        let report = HealthReport::new(false);
        assert_eq!(report.status, "degraded");
        assert!(!report.db_healthy);
        assert_eq!(HealthReport::new(true).status, "ok");
    }
}
