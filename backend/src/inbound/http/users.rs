//! Login and current-identity handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"admin@example.com","password":"password"}
//! GET  /api/v1/me    Authorization: Bearer <token>
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::TokenError;
use crate::domain::{Error, Identity, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let password = Zeroizing::new(value.password);
        Self::try_from_parts(&value.email, &password)
    }
}

/// Bearer credential returned by a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the credential expires.
    #[schema(example = 3600)]
    pub expires_in: u64,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_token_error(err: TokenError) -> Error {
    error!(error = %err, "failed to issue credential");
    Error::internal(format!("failed to issue credential: {err}"))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let identity = state.login.authenticate(&credentials).await?;
    let issued = state.tokens.issue(&identity).map_err(map_token_error)?;
    info!(subject = %identity.subject_id(), role = %identity.role(), "credential issued");

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: issued.access_token,
        token_type: "Bearer".to_owned(),
        expires_in: issued.expires_in,
    }))
}

/// Return the identity carried by the caller's credential.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current identity", body = Identity),
        (status = 401, description = "Missing or invalid credential", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentIdentity",
    security(("BearerToken" = []))
)]
#[get("/me")]
pub async fn current_identity(user: AuthenticatedUser) -> web::Json<Identity> {
    web::Json(user.into_inner())
}

#[cfg(test)]
mod tests;
