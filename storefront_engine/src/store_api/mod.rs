//! # Storefront engine public API
//!
//! The `store_api` module exposes the programmatic API for the storefront. It is split by concern so that clients can
//! pick the parts they need:
//!
//! * [`auth_api`] is the credential store: registration and login checks.
//! * [`catalog_api`] manages products and reports product sales.
//! * [`shopping_api`] handles carts, orders, credit cards and purchase history.
//!
//! # API usage
//!
//! Every API is created by supplying a database backend that implements the backend trait it needs.
//!
//! ```rust,ignore
//! use storefront_engine::{CatalogApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/storefront.db", 25).await?;
//! // SqliteDatabase implements CatalogManagement
//! let api = CatalogApi::new(db);
//! let products = api.products().await?;
//! ```
//!
//! Input validation happens here, before anything is sent to the backend.

pub mod auth_api;
pub mod catalog_api;
pub mod shopping_api;
