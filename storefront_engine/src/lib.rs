//! Storefront Engine
//!
//! The storefront engine holds the core logic of the storefront server: accounts and password checks, the product
//! catalogue, and everything a customer does with carts, orders and credit cards. It knows nothing about HTTP.
//!
//! The library is divided into three main sections:
//! 1. The backend contracts ([`mod@traits`]) and their SQLite implementation, [`SqliteDatabase`]. You should never
//!    need to access the database directly. Instead, use the public API. The exception is the data types stored in
//!    the database. These are defined in the [`db_types`] module and are public.
//! 2. The public API: [`AuthApi`], [`CatalogApi`] and [`ShoppingApi`]. Each one wraps a backend that implements the
//!    matching trait and validates input before anything reaches storage.
//! 3. Helpers for password hashing and field validation ([`mod@helpers`]).
pub mod db_types;
pub mod helpers;
mod store_api;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use store_api::{auth_api::AuthApi, catalog_api::CatalogApi, shopping_api::ShoppingApi};
pub use traits::{
    AuthApiError,
    CatalogApiError,
    CatalogManagement,
    CredentialManagement,
    ShoppingApiError,
    ShoppingManagement,
};
