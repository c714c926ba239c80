//! Access token issuing and verification.
//!
//! Access tokens are HS256 JWTs carrying the account id and user name. They are never stored on the server: a token
//! is valid iff its signature checks out against the process-wide secret and it has not yet expired.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::Error as JwtError, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use serde::{Deserialize, Serialize};
use storefront_engine::db_types::Account;

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub user_id: i64,
    pub user_name: String,
    /// Issued at, in seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, in seconds since the Unix epoch.
    pub exp: i64,
}

pub struct TokenIssuer {
    key: EncodingKey,
    lifetime: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let key = EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        Self { key, lifetime: config.token_lifetime }
    }

    /// Issue a new access token for the given account.
    /// This method DOES NOT check the account's credentials. That must be done prior to calling `issue_token`.
    pub fn issue_token(&self, account: &Account) -> Result<String, AuthError> {
        self.issue_token_at(account, Utc::now())
    }

    pub fn issue_token_at(&self, account: &Account, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let expires_at = issued_at + self.lifetime;
        let claims = JwtClaims {
            user_id: account.user_id,
            user_name: account.user_name.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.key).map_err(|e| {
            error!("🔐️ Could not sign an access token. {e}");
            AuthError::SigningError(e.to_string())
        })
    }
}

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let key = DecodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `verify_at` against an explicit clock, with no leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);
        Self { key, validation }
    }

    pub fn verify(&self, token: &str) -> Result<JwtClaims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Checks the signature of `token` and that it has not expired at `now`.
    ///
    /// Malformed tokens, bad signatures and expired tokens all produce [`AuthError::InvalidToken`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError> {
        let claims = decode::<JwtClaims>(token, &self.key, &self.validation)
            .map_err(|e: JwtError| {
                debug!("🔐️ Access token rejected. {e}");
                AuthError::InvalidToken
            })?
            .claims;
        if now.timestamp() >= claims.exp {
            debug!("🔐️ Access token for user #{} expired", claims.user_id);
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }
}

/// The identity that the bearer-token gate attached to the current request.
///
/// Handlers behind the gate take this as an argument. On a route without the gate, extraction fails with a 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub user_name: String,
}

impl From<JwtClaims> for AuthenticatedUser {
    fn from(claims: JwtClaims) -> Self {
        Self { user_id: claims.user_id, user_name: claims.user_name }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| {
            warn!("🔐️ {} was reached without passing through the bearer token gate", req.path());
            ServerError::AuthenticationError(AuthError::MissingToken)
        }))
    }
}
