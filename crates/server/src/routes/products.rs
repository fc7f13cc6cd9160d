//! Admin product management.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

use tindahan_core::ProductId;

use crate::db::ProductRepository;
use crate::db::products::ProductPage;
use crate::error::AppError;
use crate::middleware::RequireStaff;
use crate::models::product::{CreateProductInput, Product, ProductFilter, UpdateProductInput};
use crate::state::AppState;

/// Paginated product listing payload.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    /// The page of products.
    pub data: Vec<Product>,
    /// Total rows matching the filter across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
}

impl From<ProductPage> for ProductListResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            data: page.products,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
        }
    }
}

/// Build the admin products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/products", get(list).post(create))
        .route(
            "/api/admin/products/{id}",
            get(show).put(update).delete(delete),
        )
        .route("/api/admin/products/{id}/stock", put(update_stock))
}

/// List every product, including inactive ones.
///
/// GET /api/admin/products
async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<ProductListResponse>, AppError> {
    let page = ProductRepository::new(state.pool())
        .list(&filter, false)
        .await?;
    Ok(Json(page.into()))
}

/// Product detail.
///
/// GET /api/admin/products/{id}
async fn show(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

/// Create a product.
///
/// POST /api/admin/products
async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    validate_product_numbers(input.price, input.quantity, input.discount_percentage)?;
    let product = ProductRepository::new(state.pool()).create(&input).await?;
    tracing::info!(product_id = product.id.as_i32(), by = %user.email, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product; omitted fields keep their values.
///
/// PUT /api/admin/products/{id}
async fn update(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<Product>, AppError> {
    if let Some(price) = input.price
        && price < rust_decimal::Decimal::ZERO
    {
        return Err(AppError::BadRequest("Price cannot be negative".to_string()));
    }
    if let Some(quantity) = input.quantity
        && quantity < 0
    {
        return Err(AppError::BadRequest("Stock cannot be negative".to_string()));
    }
    let product = ProductRepository::new(state.pool()).update(id, &input).await?;
    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
struct StockInput {
    quantity: i32,
}

/// Set a product's stock to an absolute quantity.
///
/// PUT /api/admin/products/{id}/stock
async fn update_stock(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<StockInput>,
) -> Result<Json<Product>, AppError> {
    if input.quantity < 0 {
        return Err(AppError::BadRequest("Stock cannot be negative".to_string()));
    }
    let product = ProductRepository::new(state.pool())
        .update_stock(id, input.quantity)
        .await?;
    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /api/admin/products/{id}
async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate_product_numbers(
    price: rust_decimal::Decimal,
    quantity: i32,
    discount_percentage: Option<rust_decimal::Decimal>,
) -> Result<(), AppError> {
    if price < rust_decimal::Decimal::ZERO {
        return Err(AppError::BadRequest("Price cannot be negative".to_string()));
    }
    if quantity < 0 {
        return Err(AppError::BadRequest("Stock cannot be negative".to_string()));
    }
    if let Some(pct) = discount_percentage
        && !(rust_decimal::Decimal::ZERO..=rust_decimal::Decimal::ONE_HUNDRED).contains(&pct)
    {
        return Err(AppError::BadRequest(
            "Discount percentage must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_product_numbers() {
        assert!(validate_product_numbers(Decimal::from(100), 5, None).is_ok());
        assert!(validate_product_numbers(Decimal::from(-1), 5, None).is_err());
        assert!(validate_product_numbers(Decimal::from(100), -5, None).is_err());
        assert!(
            validate_product_numbers(Decimal::from(100), 5, Some(Decimal::from(101))).is_err()
        );
        assert!(validate_product_numbers(Decimal::from(100), 5, Some(Decimal::from(100))).is_ok());
    }
}
