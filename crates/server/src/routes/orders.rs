//! Admin order management.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, put},
};
use serde::Deserialize;

use tindahan_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::RequireStaff;
use crate::models::order::OrderWithDetails;
use crate::state::AppState;

/// Build the admin orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/orders", get(list_active))
        .route("/api/admin/orders/archived", get(list_archived))
        .route("/api/admin/orders/{id}", get(show))
        .route("/api/admin/orders/{id}/status", put(update_status))
        .route("/api/admin/orders/{id}/mark-completed", put(mark_completed))
        .route("/api/admin/orders/{id}/unarchive", patch(unarchive))
}

/// Active (non-archived) orders, newest first.
///
/// GET /api/admin/orders
async fn list_active(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderWithDetails>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list(false).await?;
    Ok(Json(orders))
}

/// Archived orders, newest first.
///
/// GET /api/admin/orders/archived
async fn list_archived(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderWithDetails>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list(true).await?;
    Ok(Json(orders))
}

/// Order detail with items, buyer, and voucher.
///
/// GET /api/admin/orders/{id}
async fn show(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithDetails>, AppError> {
    let order = OrderRepository::new(state.pool())
        .get_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
struct StatusInput {
    status: OrderStatus,
}

/// Transition an order's lifecycle status.
///
/// PUT /api/admin/orders/{id}/status
///
/// Invalid transitions come back as 409 with the reason.
async fn update_status(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<StatusInput>,
) -> Result<Json<OrderWithDetails>, AppError> {
    let repo = OrderRepository::new(state.pool());
    repo.update_status(id, input.status).await?;
    let order = repo
        .get_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    Ok(Json(order))
}

/// Mark an order delivered, paid, and archived.
///
/// PUT /api/admin/orders/{id}/mark-completed
async fn mark_completed(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithDetails>, AppError> {
    let repo = OrderRepository::new(state.pool());
    repo.mark_completed(id).await?;
    tracing::info!(order_id = id.as_i32(), by = %user.email, "order completed");
    let order = repo
        .get_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    Ok(Json(order))
}

/// Pull an archived order back into the active view, restoring stock.
///
/// PATCH /api/admin/orders/{id}/unarchive
async fn unarchive(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithDetails>, AppError> {
    let repo = OrderRepository::new(state.pool());
    repo.unarchive(id).await?;
    tracing::info!(order_id = id.as_i32(), by = %user.email, "order unarchived");
    let order = repo
        .get_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    Ok(Json(order))
}
