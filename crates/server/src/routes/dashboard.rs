//! Admin dashboard stats.

use axum::{Json, Router, extract::State, routing::get};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::{BrandRepository, CategoryRepository, OrderRepository, ProductRepository};
use crate::error::AppError;
use crate::middleware::RequireStaff;
use crate::models::order::OrderWithDetails;
use crate::state::AppState;

/// How many recent orders the dashboard shows.
const LATEST_ORDERS: i64 = 5;

/// Dashboard payload.
#[derive(Debug, Serialize)]
struct DashboardResponse {
    product_count: i64,
    category_count: i64,
    brand_count: i64,
    order_count: i64,
    /// Sum of grand totals over paid orders.
    total_revenue: Decimal,
    latest_orders: Vec<OrderWithDetails>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/admin/dashboard", get(index))
}

/// Counts, revenue, and the most recent orders.
///
/// GET /api/admin/dashboard
async fn index(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let pool = state.pool();
    let orders = OrderRepository::new(pool);

    let response = DashboardResponse {
        product_count: ProductRepository::new(pool).count().await?,
        category_count: CategoryRepository::new(pool).count().await?,
        brand_count: BrandRepository::new(pool).count().await?,
        order_count: orders.count().await?,
        total_revenue: orders.total_revenue().await?,
        latest_orders: orders.latest(LATEST_ORDERS).await?,
    };
    Ok(Json(response))
}
