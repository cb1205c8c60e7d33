//! Tests for login and current-identity handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{IssuedToken, MockLoginService, MockTokenService};
use crate::domain::{ErrorCode, Role, UserId};
use crate::inbound::http::test_utils::{admin_identity, state_with};
use crate::middleware::BearerAuth;

async fn post_login(state: HttpState, body: Value) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").service(login)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(body)
        .to_request();
    actix_test::call_service(&app, request).await
}

#[rstest]
#[case(json!({"email": "   ", "password": "password"}), "email", "empty_email")]
#[case(json!({"email": "admin@example.com", "password": ""}), "password", "empty_password")]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut login_service = MockLoginService::new();
    login_service.expect_authenticate().never();
    let state = state_with(login_service, MockTokenService::new());

    let response = post_login(state, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn login_returns_bearer_token() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .withf(|creds| creds.email() == "admin@example.com")
        .return_once(|_| Ok(admin_identity()));
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().return_once(|_| {
        Ok(IssuedToken {
            access_token: "signed".to_owned(),
            expires_at: Utc::now(),
            expires_in: 3600,
        })
    });

    let response = post_login(
        state_with(login_service, tokens),
        json!({"email": "Admin@Example.com", "password": "password"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: LoginResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.access_token, "signed");
    assert_eq!(body.token_type, "Bearer");
    assert_eq!(body.expires_in, 3600);
}

#[rstest]
#[actix_web::test]
async fn login_propagates_unauthorized() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .return_once(|_| Err(Error::unauthorized("invalid credentials")));
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();

    let response = post_login(
        state_with(login_service, tokens),
        json!({"email": "admin@example.com", "password": "nope"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn signing_failure_is_redacted() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .return_once(|_| Ok(admin_identity()));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .return_once(|_| Err(TokenError::signing("key rejected")));

    let response = post_login(
        state_with(login_service, tokens),
        json!({"email": "admin@example.com", "password": "password"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn me_returns_identity_behind_bearer_gate() {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_verify()
        .withf(|token| token == "signed")
        .return_once(|_| {
            Identity::try_new(
                UserId::new("9b2f7c1e-4d3a-4f6b-8e2d-1a5c7e9f0b3d").expect("valid id"),
                "community@example.com",
                Role::CommunityMember,
            )
            .map_err(|err| TokenError::invalid(err.to_string()))
        });
    let app = actix_test::init_service(
        App::new().service(
            web::scope("/api/v1")
                .wrap(BearerAuth::new(Arc::new(tokens)))
                .service(current_identity),
        ),
    )
    .await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", "Bearer signed"))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["email"], "community@example.com");
    assert_eq!(value["role"], "community_member");
    assert_eq!(value["subjectId"], "9b2f7c1e-4d3a-4f6b-8e2d-1a5c7e9f0b3d");
}

#[rstest]
#[actix_web::test]
async fn me_without_gate_is_unauthorized() {
    let app = actix_test::init_service(
        App::new().service(web::scope("/api/v1").service(current_identity)),
    )
    .await;
    let request = actix_test::TestRequest::get().uri("/api/v1/me").to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let err: Error = actix_test::read_body_json(response).await;
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}
