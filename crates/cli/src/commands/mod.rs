//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, staff")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,
}

/// Connect to the database named in `DATABASE_URL`.
pub(crate) async fn connect() -> Result<sqlx::PgPool, CliError> {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| CliError::MissingEnvVar("DATABASE_URL"))?;
    Ok(sqlx::PgPool::connect(&database_url).await?)
}
