//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the database row and,
//! where rows are created from outside the repository, a create DTO.

pub mod account;
pub mod item;
pub mod progress_entry;
