//! Driving port for login use-cases.
//!
//! Inbound adapters call it to authenticate credentials without importing
//! the backing account store. HTTP tests substitute a test double instead of
//! wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, Identity, LoginCredentials, Role, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}

struct DemoAccount {
    id: &'static str,
    email: &'static str,
    role: Role,
}

const DEMO_PASSWORD: &str = "password";

const DEMO_ACCOUNTS: [DemoAccount; 4] = [
    DemoAccount {
        id: "123e4567-e89b-12d3-a456-426614174000",
        email: "admin@example.com",
        role: Role::Administrator,
    },
    DemoAccount {
        id: "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        email: "particular@example.com",
        role: Role::Particular,
    },
    DemoAccount {
        id: "9b2f7c1e-4d3a-4f6b-8e2d-1a5c7e9f0b3d",
        email: "community@example.com",
        role: Role::CommunityMember,
    },
    DemoAccount {
        id: "5d1e8a2b-7c4f-4e9a-b3d6-0f2a8c6e4b1d",
        email: "provider@example.com",
        role: Role::ServiceProvider,
    },
];

/// In-memory authenticator with one demo account per role.
///
/// Every account uses the password `password`. Stands in for the managed
/// account store until it is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        let account = DEMO_ACCOUNTS
            .iter()
            .find(|account| account.email == credentials.email())
            .filter(|_| credentials.password() == DEMO_PASSWORD)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        let id = UserId::new(account.id)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        Identity::try_new(id, account.email, account.role)
            .map_err(|err| Error::internal(format!("invalid fixture identity: {err}")))
    }
}

/// Authenticator used when no account store is configured.
///
/// Every credential is rejected as `unauthorized`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLoginService;

#[async_trait]
impl LoginService for DisabledLoginService {
    async fn authenticate(&self, _credentials: &LoginCredentials) -> Result<Identity, Error> {
        Err(Error::unauthorized("invalid credentials"))
    }
}
