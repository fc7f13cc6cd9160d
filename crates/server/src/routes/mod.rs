//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (pings the database)
//!
//! # Public storefront API
//! POST /api/checkout                - Place an order
//! POST /api/vouchers/validate       - Check a voucher code
//! GET  /api/products                - Product listing (active only)
//! GET  /api/products/suggestions    - Search-as-you-type names
//! GET  /api/products/{id}           - Product detail
//!
//! # Auth
//! POST /api/admin/login             - Password login
//! POST /api/admin/logout            - Logout
//! GET  /api/admin/me                - Current session user
//!
//! # Admin (staff or admin role)
//! GET  /api/admin/dashboard         - Counts, revenue, latest orders
//! GET/POST /api/admin/products      - Product listing / create
//! GET/PUT/DELETE /api/admin/products/{id}
//! PUT  /api/admin/products/{id}/stock
//! GET/POST /api/admin/categories    - Category listing / create
//! GET/PUT/DELETE /api/admin/categories/{id}
//! GET/POST /api/admin/brands        - Brand listing / create
//! GET/PUT/DELETE /api/admin/brands/{id}
//! GET  /api/admin/orders            - Active orders
//! GET  /api/admin/orders/archived   - Archived orders
//! GET  /api/admin/orders/{id}       - Order detail
//! PUT  /api/admin/orders/{id}/status
//! PUT  /api/admin/orders/{id}/mark-completed
//! PATCH /api/admin/orders/{id}/unarchive
//! GET/POST /api/admin/vouchers      - Voucher listing / create
//! DELETE /api/admin/vouchers/{id}
//! GET  /api/admin/voucher-requests  - Review queue
//! PUT  /api/admin/voucher-requests/{id}/approve
//! PUT  /api/admin/voucher-requests/{id}/reject
//!
//! # Admin (admin role only)
//! GET/POST /api/admin/users         - User listing / create
//! GET/PUT/DELETE /api/admin/users/{id}
//! ```

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod brands;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod storefront;
pub mod users;
pub mod voucher_requests;
pub mod vouchers;

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(storefront::router())
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(brands::router())
        .merge(orders::router())
        .merge(vouchers::router())
        .merge(voucher_requests::router())
        .merge(users::router())
}
