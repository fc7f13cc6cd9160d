//! Checkout: turns a cart into an order in a single transaction.
//!
//! The whole placement runs inside one `PostgreSQL` transaction. Products
//! are locked with `SELECT ... FOR UPDATE` in ascending ID order, so two
//! concurrent checkouts for overlapping carts serialize instead of
//! deadlocking, and stock can never go negative.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;

use tindahan_core::{
    Email, OrderStatus, PaymentStatus, ProductId, Role, UserId, VoucherId, VoucherRequestStatus,
    VoucherType, percent_of, round_money,
};

use crate::db::RepositoryError;
use crate::models::order::{CartLine, CheckoutReceipt, PlaceOrderInput};

use super::auth::{PasswordError, hash_password};

/// Currency all orders are denominated in.
pub const ORDER_CURRENCY: &str = "PHP";

/// Marker note stored on orders placed through the public checkout, so the
/// admin order views can tell them from manually entered orders.
pub const CHECKOUT_NOTES: &str = "Web checkout order";

/// Errors that can fail a checkout.
///
/// The message strings are part of the public API contract; the front end
/// matches on them.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("Cart is empty.")]
    EmptyCart,

    /// A cart line asked for zero or negative units.
    #[error("Item quantities must be positive.")]
    InvalidQuantity,

    /// The buyer email failed validation.
    #[error("A valid email address is required.")]
    InvalidEmail,

    /// A cart line referenced a product that doesn't exist or isn't sellable.
    #[error("Product not found or inactive.")]
    ProductUnavailable,

    /// A product has fewer units on hand than the cart asked for.
    #[error("Not enough stock for {name}.")]
    InsufficientStock {
        /// Display name of the product that is short on stock.
        name: String,
    },

    /// The voucher code doesn't exist.
    #[error("Invalid voucher code.")]
    InvalidVoucherCode,

    /// The voucher was already consumed by an earlier order.
    #[error("This voucher has already been used.")]
    VoucherAlreadyUsed,

    /// The voucher exists but is inactive or expired.
    #[error("Invalid or expired voucher.")]
    VoucherNotApplicable,

    /// Database failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

impl From<PasswordError> for CheckoutError {
    fn from(_: PasswordError) -> Self {
        Self::Repository(RepositoryError::DataCorruption(
            "guest password hash failed".to_string(),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LockedProduct {
    id: i32,
    name: String,
    price: Decimal,
    quantity: i32,
    is_active: bool,
    on_sale: bool,
    discount_percentage: Option<Decimal>,
}

impl LockedProduct {
    /// Sale price if on sale, list price otherwise.
    fn effective_unit_price(&self) -> Decimal {
        if self.on_sale {
            let pct = self.discount_percentage.unwrap_or(Decimal::ZERO);
            round_money(self.price - percent_of(self.price, pct))
        } else {
            self.price
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LockedVoucher {
    id: i32,
    voucher_type: String,
    discount_amount: Decimal,
    expires_at: Option<chrono::NaiveDate>,
    active: bool,
    used: bool,
}

struct PricedLine {
    product_id: ProductId,
    quantity: i32,
    unit_amount: Decimal,
    total_amount: Decimal,
}

/// Place an order.
///
/// Validates the cart, provisions a guest account for unknown emails, locks
/// and decrements stock, consumes the voucher (if any), and records the
/// voucher usage as an approved review entry. Everything happens in one
/// transaction; any failure rolls the whole order back.
///
/// # Errors
///
/// Returns a `CheckoutError` describing the first problem found; see the
/// variant docs for the HTTP mapping.
pub async fn place_order(
    pool: &PgPool,
    input: &PlaceOrderInput,
) -> Result<CheckoutReceipt, CheckoutError> {
    let email = Email::parse(&input.email).map_err(|_| CheckoutError::InvalidEmail)?;
    let cart = merge_cart(&input.cart)?;

    let mut tx = pool.begin().await.map_err(RepositoryError::from)?;

    let user_id = find_or_create_buyer(&mut tx, &email).await?;

    // Lock cart products in ascending ID order (merge_cart sorts) so
    // concurrent checkouts acquire row locks in the same sequence.
    let mut subtotal = Decimal::ZERO;
    let mut lines = Vec::with_capacity(cart.len());
    for line in &cart {
        let product = sqlx::query_as::<_, LockedProduct>(
            "SELECT id, name, price, quantity, is_active, on_sale, discount_percentage
             FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(line.id)
        .fetch_optional(&mut *tx)
        .await?
        .filter(|p| p.is_active)
        .ok_or(CheckoutError::ProductUnavailable)?;

        if product.quantity < line.quantity {
            return Err(CheckoutError::InsufficientStock { name: product.name });
        }

        let unit_amount = product.effective_unit_price();
        let total_amount = round_money(unit_amount * Decimal::from(line.quantity));
        subtotal += total_amount;
        lines.push(PricedLine {
            product_id: ProductId::new(product.id),
            quantity: line.quantity,
            unit_amount,
            total_amount,
        });
    }

    let voucher = match input.voucher.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => {
            Some(validate_voucher(&mut tx, code, subtotal).await?)
        }
        _ => None,
    };
    let discount = voucher.as_ref().map_or(Decimal::ZERO, |(_, d, _)| *d);
    let grand_total = round_money((subtotal - discount).max(Decimal::ZERO));

    let (order_id,): (i32,) = sqlx::query_as(
        "INSERT INTO orders
             (user_id, grand_total, status, payment_method, payment_status, currency,
              shipping_amount, shipping_method, phone, location, notes, archived, voucher_code)
         VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9, $10, false, $11)
         RETURNING id",
    )
    .bind(user_id)
    .bind(grand_total)
    .bind(OrderStatus::New.to_string())
    .bind(&input.delivery_option)
    .bind(PaymentStatus::Pending.to_string())
    .bind(ORDER_CURRENCY)
    .bind(&input.delivery_option)
    .bind(&input.phone)
    .bind(&input.location)
    .bind(CHECKOUT_NOTES)
    .bind(voucher.as_ref().map(|(_, _, code)| code.as_str()))
    .fetch_one(&mut *tx)
    .await?;

    for line in &lines {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_amount, total_amount)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(order_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.unit_amount)
        .bind(line.total_amount)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE products
             SET quantity = quantity - $2,
                 in_stock = (quantity - $2 > 0),
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(line.product_id)
        .bind(line.quantity)
        .execute(&mut *tx)
        .await?;
    }

    if let Some((voucher_id, _, _)) = &voucher {
        sqlx::query("UPDATE vouchers SET used = true, updated_at = NOW() WHERE id = $1")
            .bind(voucher_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO voucher_requests (order_id, user_id, voucher_id, status)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(order_id)
        .bind(user_id)
        .bind(voucher_id)
        .bind(VoucherRequestStatus::Approved.to_string())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await.map_err(RepositoryError::from)?;

    tracing::info!(
        order_id,
        %grand_total,
        items = lines.len(),
        voucher = voucher.is_some(),
        "order placed"
    );

    Ok(CheckoutReceipt {
        order_id: tindahan_core::OrderId::new(order_id),
        grand_total,
    })
}

/// Find the buyer by email, or provision a guest account.
///
/// Guest accounts get a generated name and a random password they can reset
/// later; checkout never asks for one.
async fn find_or_create_buyer(
    conn: &mut PgConnection,
    email: &Email,
) -> Result<UserId, CheckoutError> {
    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&mut *conn)
        .await?;
    if let Some((id,)) = existing {
        return Ok(UserId::new(id));
    }

    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let throwaway: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    let password_hash = hash_password(&throwaway)?;

    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO users (name, email, password_hash, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(format!("Guest_{suffix}"))
    .bind(email.as_str())
    .bind(password_hash)
    .bind(Role::Customer.to_string())
    .fetch_one(&mut *conn)
    .await?;

    Ok(UserId::new(id))
}

/// Lock and validate a voucher, returning `(id, discount, stored_code)`.
async fn validate_voucher(
    conn: &mut PgConnection,
    code: &str,
    subtotal: Decimal,
) -> Result<(VoucherId, Decimal, String), CheckoutError> {
    let voucher = sqlx::query_as::<_, LockedVoucher>(
        "SELECT id, voucher_type, discount_amount, expires_at, active, used
         FROM vouchers WHERE code = $1 FOR UPDATE",
    )
    .bind(code.to_uppercase())
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(CheckoutError::InvalidVoucherCode)?;

    if voucher.used {
        return Err(CheckoutError::VoucherAlreadyUsed);
    }
    let today = Utc::now().date_naive();
    let expired = voucher.expires_at.is_some_and(|d| d < today);
    if !voucher.active || expired {
        return Err(CheckoutError::VoucherNotApplicable);
    }

    let voucher_type: VoucherType = voucher
        .voucher_type
        .parse()
        .map_err(RepositoryError::DataCorruption)?;
    let raw = match voucher_type {
        VoucherType::Fixed => voucher.discount_amount.min(subtotal),
        VoucherType::Percent => percent_of(subtotal, voucher.discount_amount),
    };

    Ok((
        VoucherId::new(voucher.id),
        round_money(raw),
        code.to_uppercase(),
    ))
}

/// Validate, merge, and sort cart lines.
///
/// Duplicate product IDs are summed into one line. The result is sorted by
/// product ID ascending; `place_order` relies on that for lock ordering.
fn merge_cart(cart: &[CartLine]) -> Result<Vec<CartLine>, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if cart.iter().any(|line| line.quantity <= 0) {
        return Err(CheckoutError::InvalidQuantity);
    }

    let mut merged: Vec<CartLine> = Vec::with_capacity(cart.len());
    for line in cart {
        if let Some(existing) = merged.iter_mut().find(|l| l.id == line.id) {
            existing.quantity = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or(CheckoutError::InvalidQuantity)?;
        } else {
            merged.push(line.clone());
        }
    }
    merged.sort_by_key(|line| line.id);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tindahan_core::ProductId;

    fn line(id: i32, quantity: i32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            quantity,
        }
    }

    #[test]
    fn test_merge_cart_sums_duplicates_and_sorts() {
        let merged = merge_cart(&[line(7, 1), line(3, 2), line(7, 4)]).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, ProductId::new(3));
        assert_eq!(merged[0].quantity, 2);
        assert_eq!(merged[1].id, ProductId::new(7));
        assert_eq!(merged[1].quantity, 5);
    }

    #[test]
    fn test_merge_cart_rejects_quantity_overflow() {
        let result = merge_cart(&[line(1, i32::MAX), line(1, 1)]);
        assert!(matches!(result, Err(CheckoutError::InvalidQuantity)));
    }

    #[test]
    fn test_merge_cart_rejects_empty() {
        assert!(matches!(merge_cart(&[]), Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn test_merge_cart_rejects_nonpositive_quantity() {
        assert!(matches!(
            merge_cart(&[line(1, 0)]),
            Err(CheckoutError::InvalidQuantity)
        ));
        assert!(matches!(
            merge_cart(&[line(1, -3)]),
            Err(CheckoutError::InvalidQuantity)
        ));
    }

    #[test]
    fn test_effective_unit_price_applies_sale() {
        let product = LockedProduct {
            id: 1,
            name: "Sardinas".to_string(),
            price: Decimal::new(10000, 2), // 100.00
            quantity: 10,
            is_active: true,
            on_sale: true,
            discount_percentage: Some(Decimal::from(25)),
        };
        assert_eq!(product.effective_unit_price(), Decimal::new(7500, 2));
    }

    #[test]
    fn test_effective_unit_price_ignores_pct_when_not_on_sale() {
        let product = LockedProduct {
            id: 1,
            name: "Sardinas".to_string(),
            price: Decimal::new(10000, 2),
            quantity: 10,
            is_active: true,
            on_sale: false,
            discount_percentage: Some(Decimal::from(25)),
        };
        assert_eq!(product.effective_unit_price(), Decimal::new(10000, 2));
    }

    #[test]
    fn test_checkout_error_messages_are_stable() {
        assert_eq!(
            CheckoutError::ProductUnavailable.to_string(),
            "Product not found or inactive."
        );
        assert_eq!(
            CheckoutError::InsufficientStock {
                name: "Bigas 5kg".to_string()
            }
            .to_string(),
            "Not enough stock for Bigas 5kg."
        );
        assert_eq!(
            CheckoutError::InvalidVoucherCode.to_string(),
            "Invalid voucher code."
        );
        assert_eq!(
            CheckoutError::VoucherAlreadyUsed.to_string(),
            "This voucher has already been used."
        );
        assert_eq!(
            CheckoutError::VoucherNotApplicable.to_string(),
            "Invalid or expired voucher."
        );
    }
}
