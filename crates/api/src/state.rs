use std::sync::Arc;

use habitcat_core::engine::ProgressEngine;
use habitcat_db::{DbPool, PgProgressStore};

use crate::config::ServerConfig;

/// The progress engine as wired for the server: backed by PostgreSQL.
pub type Engine = ProgressEngine<PgProgressStore>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly for account lookups.
    pub pool: DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Progress engine over the same pool.
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let engine = ProgressEngine::new(PgProgressStore::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}
