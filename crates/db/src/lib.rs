//! PostgreSQL persistence for habitcat.
//!
//! - [`models`] -- row structs and creation DTOs.
//! - [`repositories`] -- zero-sized repositories taking `&PgPool`.
//! - [`store`] -- [`PgProgressStore`], the engine's storage capability.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::PgProgressStore;

pub type DbPool = sqlx::PgPool;

/// How long to wait for a connection before giving up.
const ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Create a connection pool from a database URL.
///
/// Connects eagerly, so an unreachable database fails here rather than on
/// the first request.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect(database_url)
        .await
}

/// Run a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
