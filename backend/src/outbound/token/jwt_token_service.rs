//! HS256 JWT implementation of the [`TokenService`] port.
//!
//! Expiry is checked against the injected [`Clock`] with zero leeway rather
//! than by `jsonwebtoken`, so tests can pin time.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{IssuedToken, TokenError, TokenService};
use crate::domain::{Identity, Role, UserId};

/// Issuer stamped into and required from every credential.
pub const DEFAULT_ISSUER: &str = "marketplace";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: String,
    iat: i64,
    exp: i64,
    iss: String,
}

/// Signs and verifies credentials with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service over `secret`; credentials live for `ttl`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use marketplace::outbound::token::JwtTokenService;
    /// use mockable::DefaultClock;
    ///
    /// let tokens = JwtTokenService::new(
    ///     b"0123456789abcdef0123456789abcdef",
    ///     Duration::from_secs(3600),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = tokens;
    /// ```
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let secret = Zeroizing::new(secret.to_vec());
        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            issuer: DEFAULT_ISSUER.to_owned(),
            ttl,
            clock,
        }
    }

    /// Override the issuer claim.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iss"]);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

fn invalid(message: impl Into<String>) -> TokenError {
    TokenError::invalid(message)
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
        let now = self.clock.utc();
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|err| TokenError::signing(format!("invalid token lifetime: {err}")))?;
        let expires_at = now + ttl;
        let claims = Claims {
            sub: identity.subject_id().to_string(),
            email: identity.email().to_owned(),
            role: identity.role().as_str().to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        let access_token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
                .map_err(|err| TokenError::signing(err.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
            expires_in: self.ttl.as_secs(),
        })
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation())
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => invalid(err.to_string()),
            })?;

        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }

        let role: Role = claims.role.parse().map_err(|err| invalid(format!("{err}")))?;
        let subject = UserId::new(&claims.sub).map_err(|err| invalid(format!("subject: {err}")))?;
        Identity::try_new(subject, &claims.email, role)
            .map_err(|err| invalid(format!("email: {err}")))
    }
}
