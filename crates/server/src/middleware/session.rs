//! Session middleware configuration.
//!
//! `PostgreSQL`-backed sessions via tower-sessions with SameSite=Strict
//! and a 24 hour inactivity expiry.

use sqlx::PgPool;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ServerConfig;
use crate::models::user::{CurrentUser, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tindahan_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with a `PostgreSQL` store.
///
/// The session table is created by the migrations, not here.
///
/// # Panics
///
/// Panics if the schema or table name is invalid (should never happen with
/// hardcoded "public" and "sessions" values).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &ServerConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("public")
        .expect("valid schema name")
        .with_table_name("sessions")
        .expect("valid table name");

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Store the logged-in user in the session.
///
/// # Errors
///
/// Returns an error if the session store write fails.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the logged-in user and invalidate the session.
///
/// # Errors
///
/// Returns an error if the session store write fails.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(session_keys::CURRENT_USER).await?;
    session.flush().await
}
