//! Request extractors resolving the caller's identity.
//!
//! - [`auth::AuthAccount`] -- Requires a valid JWT Bearer token.
//! - [`auth::AccountScope`] -- The account scope passed to the progress engine.

pub mod auth;
