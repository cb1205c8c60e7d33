//! Bearer credential adapters.

mod jwt_token_service;

pub use jwt_token_service::{DEFAULT_ISSUER, JwtTokenService};
