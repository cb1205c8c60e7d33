//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod community_codes;
pub mod error;
pub mod health;
pub mod scope;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;

pub use error::ApiResult;
