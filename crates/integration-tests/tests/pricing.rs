//! Checkout pricing: effective unit prices and order totals.

use chrono::Utc;
use rust_decimal::Decimal;
use tindahan_core::{CategoryId, ProductId, round_money};
use tindahan_server::models::product::Product;

fn product(price: Decimal, on_sale: bool, pct: Option<Decimal>) -> Product {
    Product {
        id: ProductId::new(1),
        name: "Bigas 5kg".to_string(),
        slug: "bigas-5kg".to_string(),
        sku: None,
        description: None,
        price,
        quantity: 10,
        category_id: CategoryId::new(1),
        brand_id: None,
        is_active: true,
        is_featured: false,
        in_stock: true,
        on_sale,
        discount_percentage: pct,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn cart_of_two_at_100_totals_200() {
    let p = product(Decimal::from(100), false, None);
    let unit = p.effective_unit_price();
    let total = round_money(unit * Decimal::from(2));
    assert_eq!(total, Decimal::from(200));
}

#[test]
fn sale_price_feeds_the_line_total() {
    // 100.00 at 25% off, three units -> 225.00
    let p = product(Decimal::from(100), true, Some(Decimal::from(25)));
    let unit = p.effective_unit_price();
    assert_eq!(unit, Decimal::new(7500, 2));
    let total = round_money(unit * Decimal::from(3));
    assert_eq!(total, Decimal::new(22500, 2));
}

#[test]
fn discount_percentage_is_inert_without_on_sale() {
    let p = product(Decimal::from(100), false, Some(Decimal::from(25)));
    assert_eq!(p.effective_unit_price(), Decimal::from(100));
}

#[test]
fn awkward_prices_round_to_cents() {
    // 99.99 at 10% off -> 89.99 (89.991 rounded)
    let p = product(Decimal::new(9999, 2), true, Some(Decimal::from(10)));
    assert_eq!(p.effective_unit_price(), Decimal::new(8999, 2));
}

#[test]
fn subtotal_minus_percent_voucher_matches_worked_example() {
    // Subtotal 200.00, SAVE10 percent 10 -> 180.00
    let subtotal = Decimal::from(200);
    let discount = round_money(subtotal * Decimal::from(10) / Decimal::ONE_HUNDRED);
    assert_eq!(round_money(subtotal - discount), Decimal::from(180));
}
