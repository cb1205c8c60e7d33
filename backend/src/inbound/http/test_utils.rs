//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{MockCommunityCodeService, MockLoginService, MockTokenService};
use crate::domain::{Identity, Role, UserId};
use crate::inbound::http::state::HttpState;

pub const ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn identity(id: &str, email: &str, role: Role) -> Identity {
    Identity::try_new(UserId::new(id).expect("fixture id"), email, role).expect("fixture identity")
}

pub fn admin_identity() -> Identity {
    identity(ADMIN_ID, "admin@example.com", Role::Administrator)
}

pub fn particular_identity() -> Identity {
    identity(
        "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "particular@example.com",
        Role::Particular,
    )
}

/// State whose community code port panics if touched.
pub fn state_with(login: MockLoginService, tokens: MockTokenService) -> HttpState {
    HttpState::new(
        Arc::new(login),
        Arc::new(tokens),
        Arc::new(MockCommunityCodeService::new()),
    )
}

/// State wired for community code handlers.
pub fn state_with_codes(codes: MockCommunityCodeService) -> HttpState {
    HttpState::new(
        Arc::new(MockLoginService::new()),
        Arc::new(MockTokenService::new()),
        Arc::new(codes),
    )
}
