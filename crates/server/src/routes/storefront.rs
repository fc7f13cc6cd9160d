//! Public storefront API: checkout, voucher checks, and product browsing.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use tindahan_core::ProductId;

use crate::db::{ProductRepository, VoucherRepository};
use crate::error::AppError;
use crate::models::order::{CheckoutReceipt, PlaceOrderInput};
use crate::models::product::{Product, ProductFilter};
use crate::models::voucher::Voucher;
use crate::services::{CheckoutError, place_order};
use crate::state::AppState;

use super::products::ProductListResponse;

/// Build the storefront router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/checkout", post(checkout))
        .route("/api/vouchers/validate", post(validate_voucher))
        .route("/api/products", get(list_products))
        .route("/api/products/suggestions", get(suggestions))
        .route("/api/products/{id}", get(get_product))
}

/// Place an order.
///
/// POST /api/checkout
async fn checkout(
    State(state): State<AppState>,
    Json(input): Json<PlaceOrderInput>,
) -> Result<Json<CheckoutReceipt>, AppError> {
    let receipt = place_order(state.pool(), &input).await?;
    Ok(Json(receipt))
}

#[derive(Debug, Deserialize)]
struct ValidateVoucherInput {
    code: String,
}

#[derive(Debug, Serialize)]
struct ValidateVoucherResponse {
    voucher_id: tindahan_core::VoucherId,
    code: String,
    #[serde(rename = "type")]
    voucher_type: tindahan_core::VoucherType,
    discount_amount: rust_decimal::Decimal,
}

impl From<Voucher> for ValidateVoucherResponse {
    fn from(v: Voucher) -> Self {
        Self {
            voucher_id: v.id,
            code: v.code,
            voucher_type: v.voucher_type,
            discount_amount: v.discount_amount,
        }
    }
}

/// Check a voucher code before checkout.
///
/// POST /api/vouchers/validate
///
/// Uses the same message contract as checkout so the front end shows one
/// consistent set of voucher errors.
async fn validate_voucher(
    State(state): State<AppState>,
    Json(input): Json<ValidateVoucherInput>,
) -> Result<Json<ValidateVoucherResponse>, AppError> {
    let code = input.code.trim().to_uppercase();
    let voucher = VoucherRepository::new(state.pool())
        .find_by_code(&code)
        .await?
        .ok_or(CheckoutError::InvalidVoucherCode)?;

    if voucher.used {
        return Err(CheckoutError::VoucherAlreadyUsed.into());
    }
    if !voucher.is_applicable(Utc::now().date_naive()) {
        return Err(CheckoutError::VoucherNotApplicable.into());
    }

    Ok(Json(voucher.into()))
}

/// List active products with search, category filter, sort, and pagination.
///
/// GET /api/products
async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<ProductListResponse>, AppError> {
    let page = ProductRepository::new(state.pool())
        .list(&filter, true)
        .await?;
    Ok(Json(page.into()))
}

#[derive(Debug, Deserialize)]
struct SuggestionParams {
    #[serde(default)]
    search: String,
}

/// Product name suggestions for the search box.
///
/// GET /api/products/suggestions?search=...
async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<String>>, AppError> {
    let search = params.search.trim();
    if search.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let names = ProductRepository::new(state.pool()).suggestions(search).await?;
    Ok(Json(names))
}

/// Product detail; inactive products 404 on the public API.
///
/// GET /api/products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}
