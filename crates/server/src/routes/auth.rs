//! Authentication route handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireStaff;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::user::CurrentUser;
use crate::services::verify_password;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
        .route("/api/admin/me", get(me))
}

#[derive(Debug, Deserialize)]
struct LoginInput {
    email: String,
    password: String,
}

/// Password login.
///
/// POST /api/admin/login
///
/// Always answers a failed login with the same message, whether the email
/// is unknown or the password wrong.
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<LoginInput>,
) -> Result<Json<CurrentUser>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let record = UserRepository::new(state.pool())
        .find_auth_by_email(input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&input.password, &record.password_hash) {
        return Err(invalid());
    }

    let current = CurrentUser {
        id: record.user.id,
        email: record.user.email.clone(),
        name: record.user.name.clone(),
        role: record.user.role,
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(user_id = current.id.as_i32(), "login");
    Ok(Json(current))
}

/// Logout and invalidate the session.
///
/// POST /api/admin/logout
async fn logout(session: Session) -> Result<Json<serde_json::Value>, AppError> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session clear failed: {e}")))?;
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}

/// The logged-in user, for session restoration on the front end.
///
/// GET /api/admin/me
async fn me(RequireStaff(user): RequireStaff) -> Json<CurrentUser> {
    Json(user)
}
