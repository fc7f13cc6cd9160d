//! Voucher applicability and discount math.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tindahan_core::{VoucherId, VoucherType};
use tindahan_server::models::voucher::Voucher;

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

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn percent_voucher_takes_percentage_of_subtotal() {
    // SAVE10, 10% off a 200.00 subtotal -> 20.00 discount
    let v = voucher(VoucherType::Percent, Decimal::from(10));
    assert_eq!(v.discount_for(Decimal::from(200)), Decimal::from(20));
}

#[test]
fn fixed_voucher_never_exceeds_subtotal() {
    let v = voucher(VoucherType::Fixed, Decimal::from(500));
    assert_eq!(v.discount_for(Decimal::new(12050, 2)), Decimal::new(12050, 2));

    let v = voucher(VoucherType::Fixed, Decimal::from(50));
    assert_eq!(v.discount_for(Decimal::from(200)), Decimal::from(50));
}

#[test]
fn percent_discount_rounds_to_cents() {
    // 15% of 33.33 = 4.9995 -> 5.00
    let v = voucher(VoucherType::Percent, Decimal::from(15));
    assert_eq!(v.discount_for(Decimal::new(3333, 2)), Decimal::new(500, 2));
}

#[test]
fn inactive_used_and_expired_vouchers_are_not_applicable() {
    let today = day(2025, 7, 22);

    let mut v = voucher(VoucherType::Fixed, Decimal::from(50));
    assert!(v.is_applicable(today));

    v.active = false;
    assert!(!v.is_applicable(today));
    v.active = true;

    v.used = true;
    assert!(!v.is_applicable(today));
    v.used = false;

    v.expires_at = Some(day(2025, 7, 21));
    assert!(!v.is_applicable(today));
}

#[test]
fn voucher_is_valid_through_its_expiry_day() {
    let mut v = voucher(VoucherType::Fixed, Decimal::from(50));
    v.expires_at = Some(day(2025, 7, 22));
    assert!(v.is_applicable(day(2025, 7, 22)));
    assert!(!v.is_applicable(day(2025, 7, 23)));
}
