//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tindahan_core::{OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId, UserId};

use super::voucher::VoucherSummary;

/// An order header.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The buyer.
    pub user_id: UserId,
    /// Final payable amount after item totals and any discount.
    pub grand_total: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// How the buyer pays (mirrors the delivery option at checkout).
    pub payment_method: String,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Shipping cost.
    pub shipping_amount: Decimal,
    /// Shipping/delivery option chosen at checkout.
    pub shipping_method: Option<String>,
    /// Buyer contact number.
    pub phone: Option<String>,
    /// Delivery location.
    pub location: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Completed orders are archived out of the active view.
    pub archived: bool,
    /// Voucher code applied at checkout, if any.
    pub voucher_code: Option<String>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A line on an order.
///
/// `unit_amount` snapshots the effective unit price at checkout time and is
/// immutable afterwards, even if the product's price changes.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    /// Unique item ID.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Product ordered.
    pub product_id: ProductId,
    /// Units ordered (positive).
    pub quantity: i32,
    /// Price per unit at checkout time.
    pub unit_amount: Decimal,
    /// `unit_amount * quantity`.
    pub total_amount: Decimal,
}

/// An order item joined with its product name for detail views.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    /// The item itself.
    #[serde(flatten)]
    pub item: OrderItem,
    /// Product display name.
    pub product_name: String,
}

/// An order with items, buyer, and voucher loaded.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithDetails {
    /// The order header.
    #[serde(flatten)]
    pub order: Order,
    /// Buyer display name.
    pub user_name: String,
    /// Line items with product names.
    pub items: Vec<OrderItemDetail>,
    /// The applied voucher, if any.
    pub voucher: Option<VoucherSummary>,
}

/// One cart line in a checkout request.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    /// Product to order.
    pub id: ProductId,
    /// Units requested (must be positive).
    pub quantity: i32,
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderInput {
    /// Buyer email; a guest account is provisioned if unknown.
    pub email: String,
    /// Contact number.
    pub phone: String,
    /// Delivery location.
    pub location: String,
    /// Delivery option; doubles as the payment method.
    #[serde(alias = "deliveryOption")]
    pub delivery_option: String,
    /// Cart lines.
    pub cart: Vec<CartLine>,
    /// Optional voucher code.
    pub voucher: Option<String>,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
pub struct CheckoutReceipt {
    /// The created order.
    pub order_id: OrderId,
    /// Final payable amount.
    pub grand_total: Decimal,
}
