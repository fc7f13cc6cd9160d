//! Admin voucher management.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::Decimal;

use tindahan_core::{VoucherId, VoucherType};

use crate::db::VoucherRepository;
use crate::error::AppError;
use crate::middleware::RequireStaff;
use crate::models::voucher::{CreateVoucherInput, Voucher};
use crate::state::AppState;

/// Build the admin vouchers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/vouchers", get(list).post(create))
        .route("/api/admin/vouchers/{id}", axum::routing::delete(delete))
}

/// List vouchers, newest first.
///
/// GET /api/admin/vouchers
async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<Voucher>>, AppError> {
    let vouchers = VoucherRepository::new(state.pool()).list().await?;
    Ok(Json(vouchers))
}

/// Create a voucher. Percent vouchers must stay within 0-100.
///
/// POST /api/admin/vouchers
async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateVoucherInput>,
) -> Result<(StatusCode, Json<Voucher>), AppError> {
    if input.code.trim().is_empty() {
        return Err(AppError::BadRequest("Code is required".to_string()));
    }
    if input.discount_amount <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Discount amount must be positive".to_string(),
        ));
    }
    if input.voucher_type == VoucherType::Percent && input.discount_amount > Decimal::ONE_HUNDRED {
        return Err(AppError::BadRequest(
            "Percent discount cannot exceed 100".to_string(),
        ));
    }

    let voucher = VoucherRepository::new(state.pool()).create(&input).await?;
    tracing::info!(voucher_id = voucher.id.as_i32(), by = %user.email, "voucher created");
    Ok((StatusCode::CREATED, Json(voucher)))
}

/// Delete a voucher; refused once it backs an order's voucher request.
///
/// DELETE /api/admin/vouchers/{id}
async fn delete(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<VoucherId>,
) -> Result<StatusCode, AppError> {
    let deleted = VoucherRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Voucher not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
