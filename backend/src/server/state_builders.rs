//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use marketplace::domain::CommunityCodeRegistry;
use marketplace::domain::ports::{
    CommunityCodeRepository, CommunityCodeService, DisabledLoginService, FixtureLoginService,
    LoginService, TokenService,
};
use marketplace::inbound::http::state::HttpState;
use marketplace::inbound::http::token_config::BuildMode;
use marketplace::outbound::memory::InMemoryCommunityCodeRepository;
use marketplace::outbound::persistence::DieselCommunityCodeRepository;
use marketplace::outbound::token::JwtTokenService;

use super::ServerConfig;

fn build_repository(config: &ServerConfig) -> Arc<dyn CommunityCodeRepository> {
    match &config.db_pool {
        Some(pool) => {
            info!("community code registry backed by PostgreSQL");
            Arc::new(DieselCommunityCodeRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; community codes are kept in memory");
            Arc::new(InMemoryCommunityCodeRepository::default())
        }
    }
}

/// Demo accounts are served in debug builds or when explicitly allowed.
fn build_login_service(mode: BuildMode, allow_demo_accounts: bool) -> Arc<dyn LoginService> {
    match (mode, allow_demo_accounts) {
        (BuildMode::Debug, _) => {
            info!("demo accounts enabled for login");
            Arc::new(FixtureLoginService)
        }
        (BuildMode::Release, true) => {
            warn!("demo accounts enabled for login in a release build");
            Arc::new(FixtureLoginService)
        }
        (BuildMode::Release, false) => {
            warn!("no account store configured; every login is rejected");
            Arc::new(DisabledLoginService)
        }
    }
}

/// Build the token port and the handler state sharing it.
pub(crate) fn build_http_state(
    config: &ServerConfig,
) -> (Arc<dyn TokenService>, web::Data<HttpState>) {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        config.token_secret.as_bytes(),
        config.token_ttl,
        Arc::clone(&clock),
    ));
    let community_codes: Arc<dyn CommunityCodeService> = Arc::new(CommunityCodeRegistry::new(
        build_repository(config),
        clock,
    ));
    let state = HttpState::new(
        build_login_service(BuildMode::from_debug_assertions(), config.allow_demo_accounts),
        Arc::clone(&tokens),
        community_codes,
    );
    (tokens, web::Data::new(state))
}
