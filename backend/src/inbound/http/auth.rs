//! Request extractor for the identity attached by [`BearerAuth`].
//!
//! [`BearerAuth`]: crate::middleware::BearerAuth

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};
use serde_json::json;

use crate::domain::{Error, Identity};

/// The verified caller of a protected handler.
///
/// Extraction fails with `401` when the handler is mounted outside a scope
/// wrapped in [`BearerAuth`](crate::middleware::BearerAuth).
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(Identity);

impl AuthenticatedUser {
    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl Deref for AuthenticatedUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<Identity>().cloned();
        ready(identity.map(Self).ok_or_else(|| {
            Error::unauthorized("credential required")
                .with_details(json!({ "code": "credential_required" }))
        }))
    }
}
