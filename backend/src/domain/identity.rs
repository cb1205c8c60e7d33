//! Authenticated identities and the closed set of marketplace roles.
//!
//! An [`Identity`] is what the bearer authorizer attaches to a request once a
//! credential has been verified. Handlers read it to scope access by role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Error, UserId};

/// Marketplace roles. The set is closed; unknown role strings are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Private individual requesting services for their own property.
    Particular,
    /// Member of a residents' community.
    CommunityMember,
    /// Business answering budget requests.
    ServiceProvider,
    /// Platform operator.
    Administrator,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 4] = [
        Role::Particular,
        Role::CommunityMember,
        Role::ServiceProvider,
        Role::Administrator,
    ];

    /// Wire representation used in credentials and JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Particular => "particular",
            Self::CommunityMember => "community_member",
            Self::ServiceProvider => "service_provider",
            Self::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRoleError(s.to_owned()))
    }
}

/// Validation errors raised by [`Identity::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Verified caller identity: `{subject_id, email, role}`.
///
/// # Examples
/// ```
/// use marketplace::domain::{Identity, Role, UserId};
///
/// let identity = Identity::try_new(UserId::random(), "ana@example.com", Role::Particular)
///     .expect("valid identity");
/// assert!(identity.require_any_role(&[Role::Particular]).is_ok());
/// assert!(identity.require_any_role(&[Role::Administrator]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    subject_id: UserId,
    #[schema(example = "ana@example.com")]
    email: String,
    role: Role,
}

impl Identity {
    /// Validate and construct an identity.
    pub fn try_new(
        subject_id: UserId,
        email: &str,
        role: Role,
    ) -> Result<Self, IdentityValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(IdentityValidationError::EmptyEmail);
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(IdentityValidationError::InvalidEmail),
        }
        Ok(Self {
            subject_id,
            email: email.to_owned(),
            role,
        })
    }

    /// Credential subject.
    pub fn subject_id(&self) -> &UserId {
        &self.subject_id
    }

    /// Contact email carried in the credential.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Role carried in the credential.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Fail with `403 Forbidden` unless the identity holds one of `allowed`.
    pub fn require_any_role(&self, allowed: &[Role]) -> Result<(), Error> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "role {} may not perform this action",
                self.role
            )))
        }
    }
}
