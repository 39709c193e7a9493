//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Methods
//! that take part in multi-statement transactions accept any
//! [`sqlx::PgExecutor`], so they run against `&PgPool` or `&mut *tx` alike.

pub mod account_repo;
pub mod item_repo;
pub mod progress_repo;

pub use account_repo::AccountRepo;
pub use item_repo::ItemRepo;
pub use progress_repo::ProgressRepo;
