//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on domain
//! ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CommunityCodeService, LoginService, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenService>,
    pub community_codes: Arc<dyn CommunityCodeService>,
}

impl HttpState {
    /// Construct state from the port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use marketplace::domain::CommunityCodeRegistry;
    /// use marketplace::domain::ports::FixtureLoginService;
    /// use marketplace::inbound::http::state::HttpState;
    /// use marketplace::outbound::memory::InMemoryCommunityCodeRepository;
    /// use marketplace::outbound::token::JwtTokenService;
    /// use mockable::DefaultClock;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(JwtTokenService::new(b"secret", Duration::from_secs(60), clock.clone())),
    ///     Arc::new(CommunityCodeRegistry::new(
    ///         Arc::new(InMemoryCommunityCodeRepository::default()),
    ///         clock,
    ///     )),
    /// );
    /// # let _ = state;
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        tokens: Arc<dyn TokenService>,
        community_codes: Arc<dyn CommunityCodeService>,
    ) -> Self {
        Self {
            login,
            tokens,
            community_codes,
        }
    }
}
