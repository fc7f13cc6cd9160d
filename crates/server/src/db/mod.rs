//! Database operations for the Tindahan `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Admin, staff, and customer accounts
//! - `categories`, `brands` - Catalog taxonomy
//! - `products` - Catalog items with stock quantities
//! - `orders`, `order_items` - Orders with price snapshots
//! - `vouchers`, `voucher_requests` - Discount codes and their review trail
//! - `sessions` - tower-sessions store
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p tindahan-cli -- migrate
//! ```
//!
//! Queries use the sqlx runtime API; row structs derive `sqlx::FromRow` and
//! convert into domain models, parsing status strings on the way out.

pub mod catalog;
pub mod orders;
pub mod products;
pub mod users;
pub mod vouchers;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::{BrandRepository, CategoryRepository};
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;
pub use vouchers::{VoucherRepository, VoucherRequestRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slug or voucher code).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Parse a status string loaded from the database.
///
/// Wraps the `FromStr` error into `RepositoryError::DataCorruption`: the
/// string forms are part of the schema contract, so an unparseable value
/// means the row is bad, not the request.
pub(crate) fn parse_db_enum<T>(value: &str, column: &str) -> Result<T, RepositoryError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| RepositoryError::DataCorruption(format!("{column}: {e}")))
}
