//! Account rows. The `password` column holds a bcrypt hash and is only ever read back by
//! [`fetch_credentials_for_email`].
use log::debug;
use sfs_common::Secret;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{Account, AccountCredentials, NewAccountRecord, UserSummary},
    traits::AuthApiError,
};

#[derive(FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    account: Account,
    password: String,
}

pub async fn insert_account(account: NewAccountRecord, conn: &mut SqliteConnection) -> Result<Account, AuthApiError> {
    let result = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO users (user_id, user_name, password, email, phone, address, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING user_id, user_name, email, phone, address, created_at"#,
    )
    .bind(account.user_id)
    .bind(account.user_name)
    .bind(account.password_hash.reveal().as_str())
    .bind(account.email)
    .bind(account.phone)
    .bind(account.address)
    .bind(account.created_at)
    .fetch_one(conn)
    .await?;
    debug!("🧑️ Account #{} ({}) saved", result.user_id, result.user_name);
    Ok(result)
}

pub async fn fetch_credentials_for_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<AccountCredentials>, AuthApiError> {
    let row = sqlx::query_as::<_, CredentialsRow>(
        r#"
        SELECT user_id, user_name, email, phone, address, created_at, password
        FROM users
        WHERE email = ?"#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(row.map(|r| AccountCredentials { account: r.account, password_hash: Secret::new(r.password) }))
}

pub async fn fetch_users(conn: &mut SqliteConnection) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>("SELECT user_id, user_name FROM users ORDER BY user_id").fetch_all(conn).await
}
