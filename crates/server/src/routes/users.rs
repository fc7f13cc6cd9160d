//! User administration (admin role only).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use tindahan_core::{Role, UserId};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::user::{CreateUserInput, UpdateUserInput, User};
use crate::services::hash_password;
use crate::state::AppState;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Build the admin users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/users", get(list).post(create))
        .route("/api/admin/users/{id}", get(show).put(update).delete(delete))
}

/// List user accounts, newest first.
///
/// GET /api/admin/users
async fn list(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// User detail.
///
/// GET /api/admin/users/{id}
async fn show(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    let user = UserRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

/// Create a user account.
///
/// POST /api/admin/users
async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    let email = tindahan_core::Email::parse(input.email.trim())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if input.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let role = input.role.unwrap_or(Role::Customer);

    let user = UserRepository::new(state.pool())
        .create(name, email.as_str(), &password_hash, role)
        .await?;
    tracing::info!(user_id = user.id.as_i32(), %role, by = %admin.email, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user's name, role, or password.
///
/// PUT /api/admin/users/{id}
async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<User>, AppError> {
    // An admin demoting themselves would lock everyone out of user admin
    // if they're the last one; keep it simple and refuse self-demotion.
    if id == admin.id && input.role.is_some_and(|r| r != Role::Admin) {
        return Err(AppError::BadRequest(
            "You cannot change your own role".to_string(),
        ));
    }

    let password_hash = match &input.password {
        Some(password) => {
            if password.len() < MIN_PASSWORD_LENGTH {
                return Err(AppError::BadRequest(format!(
                    "Password must be at least {MIN_PASSWORD_LENGTH} characters"
                )));
            }
            Some(hash_password(password).map_err(|e| AppError::Internal(e.to_string()))?)
        }
        None => None,
    };

    let user = UserRepository::new(state.pool())
        .update(id, input.name.as_deref(), input.role, password_hash.as_deref())
        .await?;
    Ok(Json(user))
}

/// Delete a user account.
///
/// DELETE /api/admin/users/{id}
async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, AppError> {
    if id == admin.id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }
    let deleted = UserRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
