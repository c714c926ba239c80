//! # Storefront server
//! This crate hosts the HTTP server for the storefront. It is responsible for:
//! * Serving the product catalogue, carts, orders and credit cards over a JSON REST API.
//! * Registering accounts and logging users in, issuing signed access tokens.
//! * Guarding the per-user routes with a bearer token gate.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! See [routes](routes/index.html). Every error is returned as `{"error": "<message>"}` with a matching status code.
pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
