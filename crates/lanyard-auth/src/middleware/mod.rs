//! Axum extractors guarding authenticated routes.

pub mod error;
pub mod guard;

pub use guard::{AccessGuard, AuthState, RefreshGuard};
