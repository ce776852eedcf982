//! Bearer token authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the token from the `Authorization` header,
//! runs it through the core [`Authenticator`] (signature, expiration and
//! revocation), and injects the caller's claims into the request.
//!
//! Every failure produces the same 401 body shape. The underlying cause is
//! logged, never returned to the client.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};
use tg_core::{Authenticator, Claims};
use tg_shared::ErrorResponse;
use tracing::warn;

/// Shown when the header is absent
pub const MISSING_HEADER: &str = "Authorization header is missing";
/// Shown when the header is not `Bearer <token>`
pub const INVALID_HEADER_FORMAT: &str = "Invalid Authorization header format";
/// Shown for every token the authenticator rejects
pub const INVALID_TOKEN: &str = "Invalid or expired token";
/// Shown when a handler needs a caller the middleware did not authenticate
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated caller injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The bearer token as presented, needed to revoke it on logout
    pub token: String,
    /// Claims decoded from the token
    pub claims: Claims,
}

/// Why a request's `Authorization` header was unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRejection {
    Missing,
    InvalidFormat,
}

impl HeaderRejection {
    pub fn message(self) -> &'static str {
        match self {
            HeaderRejection::Missing => MISSING_HEADER,
            HeaderRejection::InvalidFormat => INVALID_HEADER_FORMAT,
        }
    }
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    authenticator: Authenticator,
}

impl JwtAuth {
    /// Creates a new authentication middleware backed by `authenticator`
    pub fn new(authenticator: Authenticator) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            authenticator: self.authenticator.clone(),
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    authenticator: Authenticator,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = self.authenticator.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(req.request()) {
                Ok(token) => token,
                Err(rejection) => {
                    warn!(path = %req.path(), reason = rejection.message(), "Rejected request");
                    return Ok(unauthorized(req, rejection.message()));
                }
            };

            let claims = match authenticator.authenticate(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    warn!(path = %req.path(), error = %e, "Rejected bearer token");
                    return Ok(unauthorized(req, INVALID_TOKEN));
                }
            };

            req.extensions_mut().insert(AuthContext { token, claims });

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Short-circuits the request with the uniform 401 body
fn unauthorized<B>(req: ServiceRequest, error: &str) -> ServiceResponse<EitherBody<B>> {
    req.into_response(unauthorized_response(error)).map_into_right_body()
}

fn unauthorized_response(error: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::unauthorized(error))
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(req: &HttpRequest) -> Result<String, HeaderRejection> {
    let value = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(HeaderRejection::Missing)?;

    let value = value.to_str().map_err(|_| HeaderRejection::InvalidFormat)?;
    if value.is_empty() {
        return Err(HeaderRejection::Missing);
    }

    value
        .strip_prefix(BEARER_PREFIX)
        .map(|token| token.to_string())
        .ok_or(HeaderRejection::InvalidFormat)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                InternalError::from_response(
                    AUTHENTICATION_REQUIRED,
                    unauthorized_response(AUTHENTICATION_REQUIRED),
                )
                .into()
            });

        ready(result)
    }
}
