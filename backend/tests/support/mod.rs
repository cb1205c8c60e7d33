//! Shared helpers for backend HTTP integration tests.
//!
//! Integration tests compile as separate crates, so the app wiring they all
//! need lives here instead of being repeated per file.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use chrono::{DateTime, Local, Utc};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use marketplace::Trace;
use marketplace::domain::CommunityCodeRegistry;
use marketplace::domain::ports::{CommunityCodeRepository, FixtureLoginService, TokenService};
use marketplace::inbound::http::scope::api_scope;
use marketplace::inbound::http::state::HttpState;
use marketplace::outbound::memory::InMemoryCommunityCodeRepository;
use marketplace::outbound::token::JwtTokenService;

pub const SECRET: &[u8] = b"integration-secret-integration-secret";
pub const PASSWORD: &str = "password";

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn token_service(clock: Arc<dyn Clock>) -> Arc<JwtTokenService> {
    Arc::new(JwtTokenService::new(SECRET, Duration::from_secs(3600), clock))
}

/// Ports wired the way the server wires them, over the given repository.
pub fn wire(repository: Arc<dyn CommunityCodeRepository>) -> (Arc<dyn TokenService>, HttpState) {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens: Arc<dyn TokenService> = token_service(Arc::clone(&clock));
    let registry = CommunityCodeRegistry::new(repository, clock);
    let state = HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::clone(&tokens),
        Arc::new(registry),
    );
    (tokens, state)
}

/// Build the API over a fresh in-memory registry.
pub async fn init_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let (tokens, state) = wire(Arc::new(InMemoryCommunityCodeRepository::default()));
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_scope(tokens)),
    )
    .await
}

/// Log in as a demo account and return the bearer token.
pub async fn login<S>(app: &S, email: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, request).await;
    body["accessToken"]
        .as_str()
        .expect("login returns an access token")
        .to_owned()
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}
