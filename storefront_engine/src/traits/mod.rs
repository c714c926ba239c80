//! # Backend contracts
//!
//! This module defines the behaviour that a storage backend needs to expose in order to be used by the storefront
//! APIs. Every method maps onto a single parameterized statement; validation happens in the API layer before any of
//! these are called.
//!
//! * [`CredentialManagement`] stores accounts and their password hashes, and looks them up for login.
//! * [`CatalogManagement`] covers products and the per-user sales report.
//! * [`ShoppingManagement`] covers carts, orders, order lines, credit cards and purchase history.
//!
//! Each trait carries its own error type. Backends convert driver errors into these, so that callers can branch on
//! the category of failure without looking at driver internals.
mod catalog_management;
mod credential_management;
mod shopping_management;

pub use catalog_management::{CatalogApiError, CatalogManagement};
pub use credential_management::{AuthApiError, CredentialManagement};
pub use shopping_management::{ShoppingApiError, ShoppingManagement};
