//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod community_code_repository;
mod community_code_service;
mod login_service;
mod token_service;

#[cfg(test)]
pub use community_code_repository::MockCommunityCodeRepository;
pub use community_code_repository::{CommunityCodeRepository, CommunityCodeRepositoryError};
#[cfg(test)]
pub use community_code_service::MockCommunityCodeService;
pub use community_code_service::CommunityCodeService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{DisabledLoginService, FixtureLoginService, LoginService};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{IssuedToken, TokenError, TokenService};
