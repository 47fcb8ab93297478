//! Session and credential lifecycle management for lanyard.
//!
//! This crate provides the core auth building blocks:
//!
//! - **Credentials**: argon2 password hashing behind the [`password::PasswordHasher`] trait
//! - **Tokens**: HS256 JWT access/refresh pairs ([`token::JwtService`], [`token::TokenService`])
//! - **Sessions**: capped per-user session storage with oldest-first eviction
//!   (the [`storage::SessionStorage`] trait; backends live in sibling crates)
//! - **Users**: registration, lookup and role assignment with a cache-aside
//!   read path ([`user::UserService`], [`cache::CacheService`])
//! - **Orchestration**: sign-up, sign-in, refresh exchange and logout
//!   ([`service::AuthService`])
//! - **HTTP boundary**: Axum handlers and guards for the `/auth` endpoint
//!   group ([`http`], [`middleware`])
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lanyard_auth::config::AuthConfig;
//! use lanyard_auth::http::{ApiState, router};
//!
//! let config = AuthConfig::default().from_env()?;
//! config.validate()?;
//! // wire storage backends, services and the router
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod password;
pub mod service;
pub mod storage;
pub mod token;
pub mod types;
pub mod user;

pub use cache::CacheService;
pub use config::AuthConfig;
pub use error::AuthError;
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use service::{AuthService, RefreshOutcome, SignInOutcome};
pub use storage::{NewUser, RoleStorage, SessionStorage, UserStorage};
pub use token::{JwtService, TokenClaims, TokenService};
pub use types::{CreateUser, LoginUser, PublicUser, Role, Session, TokenPair, User};
pub use user::UserService;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
