//! Request middleware.
//!
//! Request lifecycle concerns: trace correlation and bearer credential
//! checks for protected scopes.

pub mod bearer_auth;
pub mod trace;

pub use bearer_auth::BearerAuth;
pub use trace::Trace;
