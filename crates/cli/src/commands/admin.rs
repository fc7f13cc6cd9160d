//! User management commands.

use tindahan_core::{Email, Role};
use tindahan_server::services::hash_password;

use super::CliError;

/// Create a new admin or staff user.
///
/// # Errors
///
/// Returns `CliError` if the role or email is invalid, the email is already
/// taken, or the database is unreachable.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> Result<i32, CliError> {
    let role: Role = role
        .parse()
        .map_err(|_| CliError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email).map_err(|_| CliError::InvalidEmail(email.to_owned()))?;

    let pool = super::connect().await?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&pool)
        .await?;
    if existing.is_some() {
        return Err(CliError::UserExists(email.to_string()));
    }

    let password_hash = hash_password(password).map_err(|_| CliError::PasswordHash)?;

    tracing::info!("Creating user: {} ({})", email, role);
    let (user_id,): (i32,) = sqlx::query_as(
        "INSERT INTO users (name, email, password_hash, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(email.as_str())
    .bind(password_hash)
    .bind(role.to_string())
    .fetch_one(&pool)
    .await?;

    Ok(user_id)
}
