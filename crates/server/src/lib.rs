//! Tindahan Server - e-commerce administration API.
//!
//! Library crate exposing the server's modules so the integration-tests
//! crate (and the binary in `main.rs`) can use them.
//!
//! # Architecture
//!
//! - Axum web framework serving JSON to a separate React admin front end
//! - `PostgreSQL` via sqlx for the catalog, orders, and voucher stores
//! - tower-sessions (Postgres-backed) with role-gated extractors
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - Repositories over the connection pool
//! - [`models`] - Domain types and request inputs
//! - [`services`] - Checkout engine and password hashing
//! - [`middleware`] - Sessions and auth extractors
//! - [`routes`] - HTTP handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use error::AppError;
pub use state::AppState;
