//! Database operations for orders.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use tindahan_core::{
    OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId, UserId, VoucherRequestStatus,
    VoucherType,
};

use super::{RepositoryError, parse_db_enum};
use crate::models::order::{Order, OrderItem, OrderItemDetail, OrderWithDetails};
use crate::models::voucher::VoucherSummary;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    grand_total: Decimal,
    status: String,
    payment_method: String,
    payment_status: String,
    currency: String,
    shipping_amount: Decimal,
    shipping_method: Option<String>,
    phone: Option<String>,
    location: Option<String>,
    notes: Option<String>,
    archived: bool,
    voucher_code: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_name: String,
}

impl OrderRow {
    fn into_order(self) -> Result<(Order, String), RepositoryError> {
        let status: OrderStatus = parse_db_enum(&self.status, "orders.status")?;
        let payment_status: PaymentStatus =
            parse_db_enum(&self.payment_status, "orders.payment_status")?;
        let order = Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            grand_total: self.grand_total,
            status,
            payment_method: self.payment_method,
            payment_status,
            currency: self.currency,
            shipping_amount: self.shipping_amount,
            shipping_method: self.shipping_method,
            phone: self.phone,
            location: self.location,
            notes: self.notes,
            archived: self.archived,
            voucher_code: self.voucher_code,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        Ok((order, self.user_name))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    quantity: i32,
    unit_amount: Decimal,
    total_amount: Decimal,
    product_name: String,
}

impl From<OrderItemRow> for OrderItemDetail {
    fn from(row: OrderItemRow) -> Self {
        Self {
            item: OrderItem {
                id: OrderItemId::new(row.id),
                order_id: OrderId::new(row.order_id),
                product_id: ProductId::new(row.product_id),
                quantity: row.quantity,
                unit_amount: row.unit_amount,
                total_amount: row.total_amount,
            },
            product_name: row.product_name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VoucherSummaryRow {
    order_id: i32,
    code: String,
    voucher_type: String,
    discount_amount: Decimal,
    status: String,
}

impl VoucherSummaryRow {
    fn into_summary(self) -> Result<(OrderId, VoucherSummary), RepositoryError> {
        let voucher_type: VoucherType =
            parse_db_enum(&self.voucher_type, "vouchers.voucher_type")?;
        let status: VoucherRequestStatus = parse_db_enum(&self.status, "voucher_requests.status")?;
        Ok((
            OrderId::new(self.order_id),
            VoucherSummary {
                code: self.code,
                voucher_type,
                discount_amount: self.discount_amount,
                status,
            },
        ))
    }
}

const ORDER_COLUMNS: &str =
    "o.id, o.user_id, o.grand_total, o.status, o.payment_method, o.payment_status, \
     o.currency, o.shipping_amount, o.shipping_method, o.phone, o.location, o.notes, \
     o.archived, o.voucher_code, o.created_at, o.updated_at, u.name AS user_name";

const ITEM_COLUMNS: &str =
    "oi.id, oi.order_id, oi.product_id, oi.quantity, oi.unit_amount, oi.total_amount, \
     p.name AS product_name";

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders with buyer name, items, and voucher, newest first.
    ///
    /// `archived` selects the archived view; `false` is the active view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored status won't parse.
    pub async fn list(&self, archived: bool) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders o
             JOIN users u ON u.id = o.user_id
             WHERE o.archived = $1
             ORDER BY o.created_at DESC"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(archived)
            .fetch_all(self.pool)
            .await?;

        self.assemble(rows).await
    }

    /// The `n` most recent orders across both views (dashboard feed).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored status won't parse.
    pub async fn latest(&self, n: i64) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders o
             JOIN users u ON u.id = o.user_id
             ORDER BY o.created_at DESC
             LIMIT $1"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(n)
            .fetch_all(self.pool)
            .await?;

        self.assemble(rows).await
    }

    /// Get a single order with items, buyer, and voucher.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored status won't parse.
    pub async fn get_with_details(
        &self,
        id: OrderId,
    ) -> Result<Option<OrderWithDetails>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders o
             JOIN users u ON u.id = o.user_id
             WHERE o.id = $1"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut orders = self.assemble(vec![row]).await?;
        Ok(orders.pop())
    }

    /// Transition an order's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist and
    /// `RepositoryError::Conflict` if the transition isn't allowed.
    pub async fn update_status(
        &self,
        id: OrderId,
        target: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(String,)> =
            sqlx::query_as("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (current,) = row.ok_or(RepositoryError::NotFound)?;
        let current: OrderStatus = parse_db_enum(&current, "orders.status")?;

        if !current.can_transition_to(target) {
            return Err(RepositoryError::Conflict(format!(
                "Cannot move order from {current} to {target}"
            )));
        }

        sqlx::query("UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(target.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Mark an order delivered, paid, and archived in one step.
    ///
    /// Vouchers and stock are untouched; the goods already shipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist and
    /// `RepositoryError::Conflict` if it was canceled.
    pub async fn mark_completed(&self, id: OrderId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(String,)> =
            sqlx::query_as("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (current,) = row.ok_or(RepositoryError::NotFound)?;
        let current: OrderStatus = parse_db_enum(&current, "orders.status")?;

        if current == OrderStatus::Canceled {
            return Err(RepositoryError::Conflict(
                "Cannot complete a canceled order".to_string(),
            ));
        }

        sqlx::query(
            "UPDATE orders
             SET status = $2, payment_status = $3, archived = true, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(OrderStatus::Delivered.to_string())
        .bind(PaymentStatus::Paid.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Pull an archived order back, restoring its stock.
    ///
    /// Each line's quantity is added back to its product, the order is
    /// canceled, and the payment is marked failed. Only an archived order is
    /// eligible, so the stock restore cannot run twice for one order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist and
    /// `RepositoryError::Conflict` if it isn't archived.
    pub async fn unarchive(&self, id: OrderId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(bool,)> =
            sqlx::query_as("SELECT archived FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (archived,) = row.ok_or(RepositoryError::NotFound)?;

        if !archived {
            return Err(RepositoryError::Conflict(
                "Order is not archived".to_string(),
            ));
        }

        sqlx::query(
            "UPDATE products p
             SET quantity = p.quantity + oi.quantity,
                 in_stock = true,
                 updated_at = NOW()
             FROM order_items oi
             WHERE oi.order_id = $1 AND oi.product_id = p.id",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE orders
             SET archived = false, status = $2, payment_status = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(OrderStatus::Canceled.to_string())
        .bind(PaymentStatus::Failed.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Count all orders (dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Sum of grand totals over paid orders (dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn total_revenue(&self) -> Result<Decimal, RepositoryError> {
        let (total,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(grand_total), 0) FROM orders WHERE payment_status = 'paid'",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(total)
    }

    /// Attach items and voucher summaries to a batch of order rows.
    async fn assemble(
        &self,
        rows: Vec<OrderRow>,
    ) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

        let item_sql = format!(
            "SELECT {ITEM_COLUMNS}
             FROM order_items oi
             JOIN products p ON p.id = oi.product_id
             WHERE oi.order_id = ANY($1)
             ORDER BY oi.id"
        );
        let item_rows = sqlx::query_as::<_, OrderItemRow>(&item_sql)
            .bind(&ids)
            .fetch_all(self.pool)
            .await?;

        let mut items_by_order: HashMap<i32, Vec<OrderItemDetail>> = HashMap::new();
        for item in item_rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(item.into());
        }

        let voucher_rows = sqlx::query_as::<_, VoucherSummaryRow>(
            "SELECT vr.order_id, v.code, v.voucher_type, v.discount_amount, vr.status
             FROM voucher_requests vr
             JOIN vouchers v ON v.id = vr.voucher_id
             WHERE vr.order_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut vouchers_by_order: HashMap<OrderId, VoucherSummary> = HashMap::new();
        for row in voucher_rows {
            let (order_id, summary) = row.into_summary()?;
            vouchers_by_order.insert(order_id, summary);
        }

        rows.into_iter()
            .map(|row| {
                let (order, user_name) = row.into_order()?;
                let items = items_by_order.remove(&order.id.as_i32()).unwrap_or_default();
                let voucher = vouchers_by_order.remove(&order.id);
                Ok(OrderWithDetails {
                    order,
                    user_name,
                    items,
                    voucher,
                })
            })
            .collect()
    }
}
