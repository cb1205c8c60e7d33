//! Bearer credential gate for protected scopes.
//!
//! [`BearerAuth`] is wrapped once around a scope. Every request is checked
//! before routing reaches a handler: a verified [`Identity`] is stored in the
//! request extensions, and any failure short-circuits with a `401` so the
//! handler never runs.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{Error as DomainError, Identity};

const BEARER_SCHEME: &str = "bearer";

fn credential_required() -> DomainError {
    DomainError::unauthorized("credential required")
        .with_details(json!({ "code": "credential_required" }))
}

fn credential_invalid() -> DomainError {
    DomainError::unauthorized("credential invalid")
        .with_details(json!({ "code": "credential_invalid" }))
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for a missing
/// header, another scheme, or an empty token.
fn bearer_token(header: Option<&HeaderValue>) -> Option<&str> {
    let value = header?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Decide whether a request may proceed.
///
/// # Examples
/// ```
/// use actix_web::http::header::HeaderValue;
/// use marketplace::domain::ErrorCode;
/// use marketplace::middleware::bearer_auth::authorize;
/// # use marketplace::domain::ports::{IssuedToken, TokenError, TokenService};
/// # use marketplace::domain::Identity;
/// # struct Reject;
/// # impl TokenService for Reject {
/// #     fn issue(&self, _: &Identity) -> Result<IssuedToken, TokenError> {
/// #         Err(TokenError::expired())
/// #     }
/// #     fn verify(&self, _: &str) -> Result<Identity, TokenError> {
/// #         Err(TokenError::expired())
/// #     }
/// # }
///
/// let header = HeaderValue::from_static("Basic dXNlcjpwYXNz");
/// let err = authorize(Some(&header), &Reject).expect_err("wrong scheme");
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// ```
pub fn authorize(
    header: Option<&HeaderValue>,
    tokens: &dyn TokenService,
) -> Result<Identity, DomainError> {
    let token = bearer_token(header).ok_or_else(credential_required)?;
    tokens.verify(token).map_err(|err| {
        match &err {
            TokenError::Expired => debug!("rejected expired credential"),
            other => debug!(error = %other, "rejected invalid credential"),
        }
        credential_invalid()
    })
}

/// Middleware factory holding the verification port.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use actix_web::{App, web};
/// use marketplace::middleware::BearerAuth;
/// use marketplace::outbound::token::JwtTokenService;
/// use mockable::DefaultClock;
///
/// let tokens = Arc::new(JwtTokenService::new(
///     b"0123456789abcdef0123456789abcdef",
///     Duration::from_secs(3600),
///     Arc::new(DefaultClock),
/// ));
/// let app = App::new().service(web::scope("/api/v1").wrap(BearerAuth::new(tokens)));
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    tokens: Arc<dyn TokenService>,
}

impl BearerAuth {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<dyn TokenService>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = Arc::clone(&self.tokens);
        // Runs inside the caller's future so errors pick up the trace id.
        Box::pin(async move {
            match authorize(req.headers().get(AUTHORIZATION), tokens.as_ref()) {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => Ok(req.error_response(error).map_into_right_body()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::MockTokenService;
    use crate::domain::{Role, UserId};

    fn identity() -> Identity {
        Identity::try_new(
            UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id"),
            "particular@example.com",
            Role::Particular,
        )
        .expect("valid identity")
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("Bearer abc"), Some("abc"))]
    #[case(Some("bearer   abc  "), Some("abc"))]
    #[case(Some("BEARER abc"), Some("abc"))]
    #[case(Some("Bearer"), None)]
    #[case(Some("Bearer    "), None)]
    #[case(Some("Basic abc"), None)]
    #[case(Some("Bearerabc"), None)]
    #[case(Some("abc"), None)]
    fn extracts_bearer_token(#[case] raw: Option<&'static str>, #[case] expected: Option<&str>) {
        let header = raw.map(HeaderValue::from_static);
        assert_eq!(bearer_token(header.as_ref()), expected);
    }

    #[rstest]
    fn missing_credential_is_required() {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().never();

        let err = authorize(None, &tokens).expect_err("missing header rejected");

        assert_eq!(err.details(), Some(&json!({ "code": "credential_required" })));
    }

    #[rstest]
    #[case(TokenError::expired())]
    #[case(TokenError::invalid("bad signature"))]
    fn failed_verification_is_invalid(#[case] failure: TokenError) {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .withf(|token| token == "abc")
            .return_once(move |_| Err(failure));
        let header = HeaderValue::from_static("Bearer abc");

        let err = authorize(Some(&header), &tokens).expect_err("rejected");

        assert_eq!(err.details(), Some(&json!({ "code": "credential_invalid" })));
    }

    #[rstest]
    fn verified_identity_is_returned() {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().return_once(|_| Ok(identity()));
        let header = HeaderValue::from_static("Bearer abc");

        assert_eq!(authorize(Some(&header), &tokens).expect("authorized"), identity());
    }

    async fn call(
        tokens: MockTokenService,
        header: Option<&'static str>,
        hits: Arc<AtomicUsize>,
    ) -> (actix_web::http::StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(BearerAuth::new(Arc::new(tokens)))
                    .route(
                        "/whoami",
                        web::get().to(move |req: actix_web::HttpRequest| {
                            let hits = Arc::clone(&hits);
                            async move {
                                hits.fetch_add(1, Ordering::SeqCst);
                                let email = req
                                    .extensions()
                                    .get::<Identity>()
                                    .map(|identity| identity.email().to_owned());
                                HttpResponse::Ok().json(json!({ "email": email }))
                            }
                        }),
                    ),
            ),
        )
        .await;
        let mut request = actix_test::TestRequest::get().uri("/api/whoami");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let res = actix_test::call_service(&app, request.to_request()).await;
        let status = res.status();
        let body: Value = actix_test::read_body_json(res).await;
        (status, body)
    }

    #[actix_web::test]
    async fn rejected_requests_never_reach_the_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .returning(|_| Err(TokenError::expired()));

        let (missing, _) = call(MockTokenService::new(), None, Arc::clone(&hits)).await;
        let (expired, body) = call(tokens, Some("Bearer stale"), Arc::clone(&hits)).await;

        assert_eq!(missing, actix_web::http::StatusCode::UNAUTHORIZED);
        assert_eq!(expired, actix_web::http::StatusCode::UNAUTHORIZED);
        assert_eq!(body["details"]["code"], "credential_invalid");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn accepted_requests_carry_the_identity() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().return_once(|_| Ok(identity()));

        let (status, body) = call(tokens, Some("Bearer fresh"), Arc::clone(&hits)).await;

        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["email"], "particular@example.com");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
