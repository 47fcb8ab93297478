//! Storage traits for auth-related data.
//!
//! Backends implement these traits; the reference in-memory backend lives in
//! the `lanyard-auth-memory` crate. All traits are object-safe and consumed
//! as `Arc<dyn Trait>`.

pub mod role;
pub mod session;
pub mod user;

pub use role::RoleStorage;
pub use session::SessionStorage;
pub use user::{NewUser, UserStorage};
