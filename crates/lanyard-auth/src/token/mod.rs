//! Token lifecycle management.
//!
//! - [`jwt`] - JWT encoding, decoding and validation
//! - [`service`] - access/refresh token pair issuance and refresh
//! - [`extract`] - pulling the access token out of an incoming request

pub mod extract;
pub mod jwt;
pub mod service;

pub use extract::extract_access_token;
pub use jwt::{JwtError, JwtService, TokenClaims};
pub use service::TokenService;
