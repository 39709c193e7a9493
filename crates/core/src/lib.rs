//! Domain logic for habitcat: period boundaries, the percentage rule, the
//! goal/habit item model and the progress engine.
//!
//! This crate has no database dependency. Persistence is reached through the
//! [`store::ItemStore`] capability, implemented by `habitcat-db` for
//! PostgreSQL and by [`store::MemoryStore`] in-process.

pub mod board;
pub mod engine;
pub mod error;
pub mod item;
pub mod period;
pub mod progress;
pub mod store;
pub mod types;
