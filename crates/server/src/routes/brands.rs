//! Admin brand management.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use tindahan_core::BrandId;

use crate::db::BrandRepository;
use crate::error::AppError;
use crate::middleware::RequireStaff;
use crate::models::catalog::{Brand, CreateBrandInput, slugify};
use crate::state::AppState;

/// Build the admin brands router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/brands", get(list).post(create))
        .route(
            "/api/admin/brands/{id}",
            get(show).put(update).delete(delete),
        )
}

/// List brands ordered by name.
///
/// GET /api/admin/brands
async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<Brand>>, AppError> {
    let brands = BrandRepository::new(state.pool()).list().await?;
    Ok(Json(brands))
}

/// Brand detail.
///
/// GET /api/admin/brands/{id}
async fn show(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
) -> Result<Json<Brand>, AppError> {
    let brand = BrandRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Brand not found".to_string()))?;
    Ok(Json(brand))
}

/// Create a brand; the slug is derived from the name when omitted.
///
/// POST /api/admin/brands
async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateBrandInput>,
) -> Result<(StatusCode, Json<Brand>), AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    let slug = input.slug.unwrap_or_else(|| slugify(name));
    let brand = BrandRepository::new(state.pool()).create(name, &slug).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// Rename a brand.
///
/// PUT /api/admin/brands/{id}
async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
    Json(input): Json<CreateBrandInput>,
) -> Result<Json<Brand>, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    let slug = input.slug.unwrap_or_else(|| slugify(name));
    let brand = BrandRepository::new(state.pool())
        .update(id, name, &slug)
        .await?;
    Ok(Json(brand))
}

/// Delete a brand; refused while products still point at it.
///
/// DELETE /api/admin/brands/{id}
async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
) -> Result<StatusCode, AppError> {
    let deleted = BrandRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Brand not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
