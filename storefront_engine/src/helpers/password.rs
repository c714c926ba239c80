//! One-way password hashing.
//!
//! Passwords are hashed with bcrypt, which salts every call, so hashing the same password twice gives two different
//! hashes. Checking a password is a comparison against the stored hash, never a decode.
use log::warn;

use crate::traits::AuthApiError;

pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// bcrypt only looks at the first 72 bytes of its input. Longer passwords are refused outright rather than silently
/// truncated.
pub const MAX_PASSWORD_LENGTH: usize = 72;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthApiError> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthApiError::ValidationError(format!(
            "Password must not be longer than {MAX_PASSWORD_LENGTH} bytes"
        )));
    }
    bcrypt::hash(password, cost).map_err(|e| AuthApiError::HashingError(e.to_string()))
}

/// Returns true iff `password` matches the stored `hash`. A hash that cannot be parsed never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if password.len() > MAX_PASSWORD_LENGTH {
        return false;
    }
    bcrypt::verify(password, hash).unwrap_or_else(|e| {
        warn!("🔑️ Stored password hash could not be checked. {e}");
        false
    })
}
