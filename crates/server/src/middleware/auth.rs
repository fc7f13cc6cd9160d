//! Authentication extractors.
//!
//! Handlers take `RequireStaff` or `RequireAdmin` to gate access. The
//! session carries a [`CurrentUser`]; the extractors check its role.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::user::{CurrentUser, session_keys};

/// Extractor that requires a logged-in staff or admin user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireStaff(user): RequireStaff,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireStaff(pub CurrentUser);

/// Extractor that requires a logged-in admin user.
pub struct RequireAdmin(pub CurrentUser);

/// Rejection for the auth extractors.
pub enum AuthRejection {
    /// No logged-in user.
    Unauthorized,
    /// Logged in, but the role doesn't grant access.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Authentication required" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "Insufficient permissions" })),
            )
                .into_response(),
        }
    }
}

async fn current_user(parts: &mut Parts) -> Result<CurrentUser, AuthRejection> {
    // The session lives in extensions, put there by SessionManagerLayer.
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::Unauthorized)
}

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if !user.role.is_staff() {
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if user.role != tindahan_core::Role::Admin {
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(user))
    }
}
