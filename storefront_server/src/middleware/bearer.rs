//! Bearer token gate.
//!
//! This middleware can be placed on any route or service. It reads the access token from the `Authorization: Bearer`
//! header and checks it with the [`TokenVerifier`] registered as app data. If the token is valid, the caller's identity
//! is attached to the request as an [`AuthenticatedUser`] and the wrapped service is called. Otherwise a 401 response
//! is returned straight away and the wrapped service never runs.
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web,
    Error,
    HttpMessage,
};
use futures::future::{ok, ready, LocalBoxFuture, Ready};
use log::*;

use crate::{
    auth::{AuthenticatedUser, TokenVerifier},
    errors::{AuthError, ServerError},
};

const BEARER_SCHEME: &str = "Bearer";

/// Pulls the token out of an `Authorization` header value.
///
/// A missing or blank header is [`AuthError::MissingToken`]. A header that does not use the bearer scheme, or carries
/// an empty token, is [`AuthError::InvalidToken`]. The scheme name is matched case-insensitively.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.map(str::trim).filter(|h| !h.is_empty()).ok_or(AuthError::MissingToken)?;
    let (scheme, token) = header.split_once(char::is_whitespace).ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::InvalidToken);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }
    Ok(token)
}

pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = BearerAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BearerAuthService { service })
    }
}

pub struct BearerAuthService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for BearerAuthService<S>
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
        match authenticate(&req) {
            Ok(user) => {
                trace!("🔐️ {} authenticated as user #{}", req.path(), user.user_id);
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            },
            Err(e) => {
                debug!("🔐️ Request to {} refused. {e}", req.path());
                let res = req.error_response(e).map_into_right_body();
                Box::pin(ready(Ok(res)))
            },
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, ServerError> {
    let verifier = req.app_data::<web::Data<TokenVerifier>>().ok_or_else(|| {
        error!("🔐️ No token verifier has been registered with the app. Every gated request will fail.");
        ServerError::ConfigurationError("No token verifier available".to_string())
    })?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.to_str().map_err(|_| AuthError::InvalidToken))
        .transpose()?;
    let token = extract_bearer_token(header)?;
    let claims = verifier.verify(token)?;
    Ok(claims.into())
}
