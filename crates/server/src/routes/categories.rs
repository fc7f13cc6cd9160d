//! Admin category management.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use tindahan_core::CategoryId;

use crate::db::CategoryRepository;
use crate::error::AppError;
use crate::middleware::RequireStaff;
use crate::models::catalog::{Category, CreateCategoryInput, slugify};
use crate::state::AppState;

/// Build the admin categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/categories", get(list).post(create))
        .route(
            "/api/admin/categories/{id}",
            get(show).put(update).delete(delete),
        )
}

/// List categories ordered by name.
///
/// GET /api/admin/categories
async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// Category detail.
///
/// GET /api/admin/categories/{id}
async fn show(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    Ok(Json(category))
}

/// Create a category; the slug is derived from the name when omitted.
///
/// POST /api/admin/categories
async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    let slug = input.slug.unwrap_or_else(|| slugify(name));
    let category = CategoryRepository::new(state.pool())
        .create(name, &slug)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename a category (slug re-derived unless given).
///
/// PUT /api/admin/categories/{id}
async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<Json<Category>, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    let slug = input.slug.unwrap_or_else(|| slugify(name));
    let category = CategoryRepository::new(state.pool())
        .update(id, name, &slug)
        .await?;
    Ok(Json(category))
}

/// Delete a category; refused while products still point at it.
///
/// DELETE /api/admin/categories/{id}
async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, AppError> {
    let deleted = CategoryRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Category not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
