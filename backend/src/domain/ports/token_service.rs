//! Port for minting and verifying bearer credentials.
//!
//! Verification is CPU-bound and needs nothing beyond the shared secret held
//! by the adapter, so the trait is synchronous.

use chrono::{DateTime, Utc};

use crate::domain::Identity;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The credential is past its expiry.
        Expired => "credential expired",
        /// The credential is malformed, mis-signed or carries bad claims.
        Invalid { message: String } => "credential invalid: {message}",
        /// The credential could not be signed.
        Signing { message: String } => "failed to sign credential: {message}",
    }
}

/// A freshly minted bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded token presented as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds from issuance.
    pub expires_in: u64,
}

/// Port for issuing and verifying signed, time-bound credentials.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Mint a credential for `identity`.
    fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenError>;

    /// Check signature and expiry, then decode the embedded identity.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
