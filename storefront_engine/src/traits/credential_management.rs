use thiserror::Error;

use crate::db_types::{Account, AccountCredentials, NewAccountRecord};

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Invalid account data. {0}")]
    ValidationError(String),
    /// Returned for both an unknown email and a wrong password, so that callers cannot tell the two apart.
    #[error("Invalid email or password")]
    AuthenticationFailed,
    #[error("An account with this id, user name or email already exists")]
    DuplicateAccount,
    #[error("Could not hash password. {0}")]
    HashingError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref de) if de.is_unique_violation() => AuthApiError::DuplicateAccount,
            _ => AuthApiError::DatabaseError(e.to_string()),
        }
    }
}

/// The `CredentialManagement` trait defines the storage side of the credential store.
///
/// Implementations never see a plaintext password. Hashing and comparison happen in [`crate::AuthApi`], which is the
/// API clients should use.
#[allow(async_fn_in_trait)]
pub trait CredentialManagement {
    /// Persists a new account in a single write. A clash on the account id, user name or email must be reported as
    /// [`AuthApiError::DuplicateAccount`], and must leave nothing behind.
    async fn insert_account(&self, account: NewAccountRecord) -> Result<Account, AuthApiError>;

    /// Fetches the account and stored password hash for the given email. If no account exists, `None` is returned.
    async fn fetch_credentials_for_email(&self, email: &str) -> Result<Option<AccountCredentials>, AuthApiError>;
}
