//! Composition of the versioned API scope.
//!
//! Login is the only public endpoint under `/api/v1`; everything else is
//! mounted behind a single [`BearerAuth`] layer.

use std::sync::Arc;

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, Scope, web};
use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::TokenService;
use crate::inbound::http::community_codes::{
    delete_community_code, get_community_code, get_or_create_community_code,
    list_community_codes,
};
use crate::inbound::http::users::{current_identity, login};
use crate::middleware::BearerAuth;

pub const API_PREFIX: &str = "/api/v1";

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(format!("invalid request body: {err}")).into()
}

/// Body parsing failures answer with the structured error payload.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Build the `/api/v1` scope. Handlers expect `web::Data<HttpState>`
/// registered on the enclosing app.
pub fn api_scope(tokens: Arc<dyn TokenService>) -> Scope {
    let protected = web::scope("")
        .wrap(BearerAuth::new(tokens))
        .service(current_identity)
        .service(get_or_create_community_code)
        .service(list_community_codes)
        .service(get_community_code)
        .service(delete_community_code);

    web::scope(API_PREFIX)
        .app_data(json_config())
        .service(login)
        .service(protected)
}
