//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are simple functions (rather than stateful structs) that accept a `&mut SqliteConnection`
//! argument. Each one issues exactly one statement. Callers obtain a connection from the pool and call through.
use std::str::FromStr;

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod accounts;
pub mod carts;
pub mod credit_cards;
pub mod orders;
pub mod products;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true).foreign_keys(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    info!("🗃️ Connected to {url} with up to {max_connections} connections");
    Ok(pool)
}

/// Returns true if the error is the database refusing a write because of a foreign key constraint.
pub(crate) fn is_foreign_key_violation(e: &SqlxError) -> bool {
    matches!(e, SqlxError::Database(de) if de.is_foreign_key_violation())
}
