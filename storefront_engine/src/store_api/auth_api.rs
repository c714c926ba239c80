//! The credential store.
//!
//! Passwords arrive in plaintext, are hashed with bcrypt before they reach the backend, and are never stored, logged or
//! returned. Hashing is CPU-heavy, so both hashing and comparison run on tokio's blocking thread pool.
use std::{
    fmt::Debug,
    sync::{Arc, OnceLock},
};

use chrono::Utc;
use log::*;
use sfs_common::Secret;

use crate::{
    db_types::{Account, NewAccount, NewAccountRecord},
    helpers::{hash_password, require_positive, require_text, verify_password, DEFAULT_HASH_COST},
    traits::{AuthApiError, CredentialManagement},
};

/// Checked against when no account matches the login email, so that an unknown email costs the same bcrypt
/// comparison as a wrong password.
const DUMMY_PASSWORD: &str = "no-such-account";

pub struct AuthApi<B> {
    db: B,
    hash_cost: u32,
    dummy_hash: Arc<OnceLock<String>>,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?}, cost {})", self.db, self.hash_cost)
    }
}

impl<B> AuthApi<B>
where B: CredentialManagement
{
    pub fn new(db: B) -> Self {
        Self { db, hash_cost: DEFAULT_HASH_COST, dummy_hash: Arc::new(OnceLock::new()) }
    }

    /// Sets the bcrypt work factor used for new passwords. Existing hashes carry their own cost and are unaffected.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self.dummy_hash = Arc::new(OnceLock::new());
        self
    }

    pub fn hash_cost(&self) -> u32 {
        self.hash_cost
    }

    /// Registers a new account.
    ///
    /// The user name, password, email and address are required. The password is hashed and the account written in a
    /// single statement, so a failed registration leaves nothing behind.
    pub async fn register(&self, account: NewAccount) -> Result<Account, AuthApiError> {
        validate_new_account(&account)?;
        let NewAccount { user_id, user_name, password, email, phone, address } = account;
        let password_hash = hash_in_background(password, self.hash_cost).await?;
        let record = NewAccountRecord {
            user_id,
            user_name,
            email,
            phone,
            address,
            password_hash: Secret::new(password_hash),
            created_at: Utc::now(),
        };
        let account = self.db.insert_account(record).await.map_err(|e| {
            debug!("🔑️ Registration failed. {e}");
            e
        })?;
        info!("🔑️ New account #{} registered for {}", account.user_id, account.user_name);
        Ok(account)
    }

    /// Checks the password for the account registered with `email`.
    ///
    /// An unknown email and a wrong password both produce [`AuthApiError::AuthenticationFailed`].
    pub async fn verify_credentials(&self, email: &str, password: &Secret<String>) -> Result<Account, AuthApiError> {
        require_text("email", email).map_err(AuthApiError::ValidationError)?;
        require_text("password", password.reveal()).map_err(AuthApiError::ValidationError)?;
        let Some(credentials) = self.db.fetch_credentials_for_email(email).await? else {
            self.check_against_dummy_hash(password).await;
            debug!("🔑️ Login refused. No account for the given email");
            return Err(AuthApiError::AuthenticationFailed);
        };
        let password = password.clone();
        let hash = credentials.password_hash;
        let matches = tokio::task::spawn_blocking(move || verify_password(password.reveal(), hash.reveal()))
            .await
            .map_err(|e| AuthApiError::HashingError(e.to_string()))?;
        if matches {
            debug!("🔑️ Login accepted for account #{}", credentials.account.user_id);
            Ok(credentials.account)
        } else {
            debug!("🔑️ Login refused. Wrong password for account #{}", credentials.account.user_id);
            Err(AuthApiError::AuthenticationFailed)
        }
    }
}

impl<B> AuthApi<B> {
    /// Runs a bcrypt comparison and ignores the result. The dummy hash is made on first use, at the configured cost.
    async fn check_against_dummy_hash(&self, password: &Secret<String>) {
        let password = password.clone();
        let dummy_hash = Arc::clone(&self.dummy_hash);
        let cost = self.hash_cost;
        let result = tokio::task::spawn_blocking(move || {
            let hash = dummy_hash.get_or_init(|| {
                hash_password(DUMMY_PASSWORD, cost).unwrap_or_else(|e| {
                    warn!("🔑️ Could not create the dummy password hash. {e}");
                    String::new()
                })
            });
            verify_password(password.reveal(), hash)
        })
        .await;
        if let Err(e) = result {
            warn!("🔑️ Dummy password check did not complete. {e}");
        }
    }
}

fn validate_new_account(account: &NewAccount) -> Result<(), AuthApiError> {
    if let Some(id) = account.user_id {
        require_positive("user_id", id).map_err(AuthApiError::ValidationError)?;
    }
    require_text("user_name", &account.user_name)
        .and_then(|_| require_text("password", account.password.reveal()))
        .and_then(|_| require_text("email", &account.email))
        .and_then(|_| require_text("address", &account.address))
        .map_err(AuthApiError::ValidationError)
}

async fn hash_in_background(password: Secret<String>, cost: u32) -> Result<String, AuthApiError> {
    tokio::task::spawn_blocking(move || hash_password(password.reveal(), cost))
        .await
        .map_err(|e| AuthApiError::HashingError(e.to_string()))?
}
