//! End-to-end behaviour of the bearer authorizer in front of the API.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use actix_web::test;
use chrono::{Duration as ChronoDuration, Utc};
use rstest::rstest;
use serde_json::Value;

use marketplace::domain::ports::TokenService;
use marketplace::domain::{Identity, Role, TRACE_ID_HEADER, UserId};

mod support;

use support::{FixedClock, bearer, init_app, login, token_service};

#[rstest]
#[case("admin@example.com", "administrator")]
#[case("particular@example.com", "particular")]
#[case("community@example.com", "community_member")]
#[case("provider@example.com", "service_provider")]
#[actix_web::test]
async fn issued_tokens_authorize_every_role(#[case] email: &str, #[case] role: &str) {
    let app = init_app().await;
    let token = login(&app, email).await;

    let request = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, request).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], role);
}

#[rstest]
#[case(None)]
#[case(Some("Basic YWRtaW46cGFzc3dvcmQ="))]
#[case(Some("Bearer "))]
#[actix_web::test]
async fn missing_credential_is_required(#[case] header: Option<&'static str>) {
    let app = init_app().await;
    let mut request = test::TestRequest::get().uri("/api/v1/community-codes");
    if let Some(value) = header {
        request = request.insert_header((AUTHORIZATION, value));
    }

    let res = test::call_service(&app, request.to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["details"]["code"], "credential_required");
    assert!(body["traceId"].is_string());
}

fn expired_token() -> String {
    let issued_at = Utc::now() - ChronoDuration::hours(2);
    let past = token_service(Arc::new(FixedClock(issued_at)));
    let identity = Identity::try_new(UserId::random(), "particular@example.com", Role::Particular)
        .expect("valid identity");
    past.issue(&identity).expect("token issued").access_token
}

#[rstest]
#[case::expired(expired_token())]
#[case::garbage("not.a.token".to_owned())]
#[actix_web::test]
async fn invalid_credentials_are_rejected(#[case] token: String) {
    let app = init_app().await;

    let request = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, request).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "credential_invalid");
}

#[rstest]
#[actix_web::test]
async fn tampered_signature_is_rejected() {
    let app = init_app().await;
    let mut token = login(&app, "particular@example.com").await;
    let last = token.pop().expect("non-empty token");
    token.push(if last == 'A' { 'B' } else { 'A' });

    let request = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, request).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn wrong_password_does_not_issue_a_token() {
    let app = init_app().await;

    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(serde_json::json!({ "email": "admin@example.com", "password": "nope" }))
        .to_request();
    let res = test::call_service(&app, request).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
