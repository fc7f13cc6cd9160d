//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tindahan_core::{Email, Role, UserId};

/// A user account (domain type).
///
/// The password hash never leaves the repository layer; see
/// [`crate::db::users::AuthRecord`].
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique).
    pub email: Email,
    /// Role gating admin access.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Session-stored identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's display name.
    pub name: String,
    /// User's role.
    pub role: Role,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

/// Input for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Role (defaults to customer).
    pub role: Option<Role>,
}

/// Input for updating a user.
#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    /// New display name.
    pub name: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New plaintext password (hashed before storage).
    pub password: Option<String>,
}
