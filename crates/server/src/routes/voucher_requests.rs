//! Admin review queue for voucher usage.
//!
//! Checkout records each consumed voucher as an approved request; admins
//! can flip a request to rejected (or back) with an optional note. The
//! decision is an audit record and does not re-price the order.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;

use tindahan_core::{VoucherRequestId, VoucherRequestStatus};

use crate::db::VoucherRequestRepository;
use crate::error::AppError;
use crate::middleware::RequireStaff;
use crate::models::voucher::VoucherRequestDetail;
use crate::state::AppState;

/// Build the voucher requests router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/voucher-requests", get(list))
        .route("/api/admin/voucher-requests/{id}/approve", put(approve))
        .route("/api/admin/voucher-requests/{id}/reject", put(reject))
}

/// List voucher requests with code and buyer, newest first.
///
/// GET /api/admin/voucher-requests
async fn list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<VoucherRequestDetail>>, AppError> {
    let requests = VoucherRequestRepository::new(state.pool())
        .list_detailed()
        .await?;
    Ok(Json(requests))
}

#[derive(Debug, Default, Deserialize)]
struct ReviewInput {
    admin_note: Option<String>,
}

/// Approve a voucher request.
///
/// PUT /api/admin/voucher-requests/{id}/approve
async fn approve(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<VoucherRequestId>,
    input: Option<Json<ReviewInput>>,
) -> Result<Json<serde_json::Value>, AppError> {
    review(state, id, VoucherRequestStatus::Approved, input, &user.email.to_string()).await
}

/// Reject a voucher request.
///
/// PUT /api/admin/voucher-requests/{id}/reject
async fn reject(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<VoucherRequestId>,
    input: Option<Json<ReviewInput>>,
) -> Result<Json<serde_json::Value>, AppError> {
    review(state, id, VoucherRequestStatus::Rejected, input, &user.email.to_string()).await
}

async fn review(
    state: AppState,
    id: VoucherRequestId,
    status: VoucherRequestStatus,
    input: Option<Json<ReviewInput>>,
    reviewer: &str,
) -> Result<Json<serde_json::Value>, AppError> {
    let note = input.and_then(|Json(i)| i.admin_note);
    VoucherRequestRepository::new(state.pool())
        .set_status(id, status, note.as_deref())
        .await?;
    tracing::info!(request_id = id.as_i32(), %status, reviewer, "voucher request reviewed");
    Ok(Json(serde_json::json!({ "message": "Voucher request updated" })))
}
