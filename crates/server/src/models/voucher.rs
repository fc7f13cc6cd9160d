//! Voucher domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tindahan_core::{
    OrderId, UserId, VoucherId, VoucherRequestId, VoucherRequestStatus, VoucherType, percent_of,
    round_money,
};

/// A discount code.
#[derive(Debug, Clone, Serialize)]
pub struct Voucher {
    /// Unique voucher ID.
    pub id: VoucherId,
    /// Code entered at checkout (unique).
    pub code: String,
    /// Discount semantics.
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    /// Flat amount for `fixed`, 0-100 for `percent`.
    pub discount_amount: Decimal,
    /// Last day the voucher is valid, inclusive.
    pub expires_at: Option<NaiveDate>,
    /// Whether the voucher can currently be applied.
    pub active: bool,
    /// Whether the voucher has been consumed by a checkout.
    pub used: bool,
    /// When the voucher was created.
    pub created_at: DateTime<Utc>,
    /// When the voucher was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Voucher {
    /// Whether the voucher has expired as of `today`.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_at.is_some_and(|d| d < today)
    }

    /// Whether the voucher can be applied to a new order as of `today`.
    #[must_use]
    pub fn is_applicable(&self, today: NaiveDate) -> bool {
        self.active && !self.used && !self.is_expired(today)
    }

    /// The discount this voucher takes off `subtotal`.
    ///
    /// Fixed vouchers never discount more than the subtotal itself; percent
    /// vouchers take `discount_amount` percent. Rounded to the money scale.
    #[must_use]
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        let raw = match self.voucher_type {
            VoucherType::Fixed => self.discount_amount.min(subtotal),
            VoucherType::Percent => percent_of(subtotal, self.discount_amount),
        };
        round_money(raw)
    }
}

/// Summary of the voucher applied to an order, for order detail views.
#[derive(Debug, Clone, Serialize)]
pub struct VoucherSummary {
    /// The code that was applied.
    pub code: String,
    /// Discount semantics.
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    /// Flat amount or percentage.
    pub discount_amount: Decimal,
    /// Review status of the matching voucher request.
    pub status: VoucherRequestStatus,
}

/// A record tracking admin review of a voucher applied to an order.
#[derive(Debug, Clone, Serialize)]
pub struct VoucherRequest {
    /// Unique request ID.
    pub id: VoucherRequestId,
    /// The order the voucher was applied to.
    pub order_id: OrderId,
    /// The buyer.
    pub user_id: UserId,
    /// The voucher.
    pub voucher_id: VoucherId,
    /// Review status.
    pub status: VoucherRequestStatus,
    /// Note left by the reviewing admin.
    pub admin_note: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A voucher request joined with its code and buyer name for listing.
#[derive(Debug, Clone, Serialize)]
pub struct VoucherRequestDetail {
    /// The request itself.
    #[serde(flatten)]
    pub request: VoucherRequest,
    /// Voucher code.
    pub voucher_code: String,
    /// Buyer display name.
    pub user_name: String,
}

/// Input for creating a voucher.
#[derive(Debug, Deserialize)]
pub struct CreateVoucherInput {
    pub code: String,
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    pub discount_amount: Decimal,
    pub expires_at: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn voucher(voucher_type: VoucherType, amount: Decimal) -> Voucher {
        Voucher {
            id: VoucherId::new(1),
            code: "SAVE10".to_string(),
            voucher_type,
            discount_amount: amount,
            expires_at: None,
            active: true,
            used: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_percent_discount() {
        // SAVE10: 10% of 200 -> 20
        let v = voucher(VoucherType::Percent, Decimal::from(10));
        assert_eq!(v.discount_for(Decimal::from(200)), Decimal::from(20));
    }

    #[test]
    fn test_fixed_discount_capped_at_subtotal() {
        let v = voucher(VoucherType::Fixed, Decimal::from(500));
        assert_eq!(v.discount_for(Decimal::from(120)), Decimal::from(120));
    }

    #[test]
    fn test_applicability() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();
        let mut v = voucher(VoucherType::Fixed, Decimal::from(50));
        assert!(v.is_applicable(today));

        v.active = false;
        assert!(!v.is_applicable(today));
        v.active = true;

        v.used = true;
        assert!(!v.is_applicable(today));
        v.used = false;

        v.expires_at = NaiveDate::from_ymd_opt(2025, 7, 21);
        assert!(!v.is_applicable(today));

        // Expiry day itself is still valid
        v.expires_at = NaiveDate::from_ymd_opt(2025, 7, 22);
        assert!(v.is_applicable(today));
    }
}
