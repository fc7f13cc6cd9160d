//! Database-backed checkout tests.
//!
//! Each test runs against a fresh database created from the server
//! migrations (`#[sqlx::test]`); `DATABASE_URL` must point at a reachable
//! `PostgreSQL` server.

use rust_decimal::Decimal;
use sqlx::PgPool;

use tindahan_core::{OrderStatus, PaymentStatus, VoucherType};
use tindahan_server::db::{
    CategoryRepository, OrderRepository, ProductRepository, RepositoryError, VoucherRepository,
};
use tindahan_server::models::order::{CartLine, PlaceOrderInput};
use tindahan_server::models::product::{CreateProductInput, Product};
use tindahan_server::models::voucher::CreateVoucherInput;
use tindahan_server::services::{CheckoutError, place_order};

async fn seed_product(pool: &PgPool, slug: &str, price: i64, quantity: i32, active: bool) -> Product {
    let category = CategoryRepository::new(pool)
        .create(&format!("Category {slug}"), &format!("category-{slug}"))
        .await
        .unwrap();
    ProductRepository::new(pool)
        .create(&CreateProductInput {
            name: format!("Product {slug}"),
            slug: slug.to_string(),
            sku: None,
            description: None,
            price: Decimal::from(price),
            quantity,
            category_id: category.id,
            brand_id: None,
            is_active: active,
            is_featured: false,
            in_stock: quantity > 0,
            on_sale: false,
            discount_percentage: None,
        })
        .await
        .unwrap()
}

fn checkout_input(cart: Vec<CartLine>, voucher: Option<&str>) -> PlaceOrderInput {
    PlaceOrderInput {
        email: "buyer@example.com".to_string(),
        phone: "09171234567".to_string(),
        location: "Quezon City".to_string(),
        delivery_option: "cod".to_string(),
        cart,
        voucher: voucher.map(str::to_string),
    }
}

async fn stock_of(pool: &PgPool, product: &Product) -> i32 {
    ProductRepository::new(pool)
        .get(product.id)
        .await
        .unwrap()
        .unwrap()
        .quantity
}

async fn order_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

#[sqlx::test(migrations = "../server/migrations")]
async fn checkout_decrements_stock_and_records_order(pool: PgPool) {
    let product = seed_product(&pool, "adobo-mix", 100, 10, true).await;

    let input = checkout_input(
        vec![CartLine {
            id: product.id,
            quantity: 3,
        }],
        None,
    );
    let receipt = place_order(&pool, &input).await.unwrap();

    assert_eq!(receipt.grand_total, Decimal::from(300));
    assert_eq!(stock_of(&pool, &product).await, 7);

    let detail = OrderRepository::new(&pool)
        .get_with_details(receipt.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.order.status, OrderStatus::New);
    assert_eq!(detail.order.payment_status, PaymentStatus::Pending);
    assert_eq!(detail.order.notes.as_deref(), Some("Web checkout order"));
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].item.quantity, 3);
    assert_eq!(detail.items[0].item.unit_amount, Decimal::from(100));
}

#[sqlx::test(migrations = "../server/migrations")]
async fn over_ordering_fails_and_leaves_stock_untouched(pool: PgPool) {
    let product = seed_product(&pool, "bagoong", 50, 2, true).await;

    let input = checkout_input(
        vec![CartLine {
            id: product.id,
            quantity: 5,
        }],
        None,
    );
    let err = place_order(&pool, &input).await.unwrap_err();

    assert!(matches!(err, CheckoutError::InsufficientStock { ref name } if name == &product.name));
    assert_eq!(stock_of(&pool, &product).await, 2);
    assert_eq!(order_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../server/migrations")]
async fn inactive_product_fails_with_no_order_row(pool: PgPool) {
    let product = seed_product(&pool, "retired-sku", 75, 10, false).await;

    let input = checkout_input(
        vec![CartLine {
            id: product.id,
            quantity: 1,
        }],
        None,
    );
    let err = place_order(&pool, &input).await.unwrap_err();

    assert!(matches!(err, CheckoutError::ProductUnavailable));
    assert_eq!(order_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../server/migrations")]
async fn failed_line_rolls_back_earlier_lines(pool: PgPool) {
    // The first line would succeed on its own; the second fails, and the
    // whole checkout must leave the first product's stock untouched.
    let plenty = seed_product(&pool, "sinigang-mix", 40, 10, true).await;
    let scarce = seed_product(&pool, "last-lechon", 900, 1, true).await;

    let input = checkout_input(
        vec![
            CartLine {
                id: plenty.id,
                quantity: 2,
            },
            CartLine {
                id: scarce.id,
                quantity: 5,
            },
        ],
        None,
    );
    let err = place_order(&pool, &input).await.unwrap_err();

    assert!(matches!(err, CheckoutError::InsufficientStock { .. }));
    assert_eq!(stock_of(&pool, &plenty).await, 10);
    assert_eq!(stock_of(&pool, &scarce).await, 1);
    assert_eq!(order_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../server/migrations")]
async fn voucher_is_consumed_once_and_discount_applied(pool: PgPool) {
    let product = seed_product(&pool, "kakanin-box", 100, 10, true).await;
    VoucherRepository::new(&pool)
        .create(&CreateVoucherInput {
            code: "SAVE10".to_string(),
            voucher_type: VoucherType::Percent,
            discount_amount: Decimal::from(10),
            expires_at: None,
            active: true,
        })
        .await
        .unwrap();

    let input = checkout_input(
        vec![CartLine {
            id: product.id,
            quantity: 2,
        }],
        Some("SAVE10"),
    );
    let receipt = place_order(&pool, &input).await.unwrap();
    assert_eq!(receipt.grand_total, Decimal::new(18000, 2));

    let voucher = VoucherRepository::new(&pool)
        .find_by_code("SAVE10")
        .await
        .unwrap()
        .unwrap();
    assert!(voucher.used);

    let (approved,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM voucher_requests WHERE status = 'approved'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(approved, 1);

    // A second checkout with the spent code is refused before any writes.
    let retry = checkout_input(
        vec![CartLine {
            id: product.id,
            quantity: 1,
        }],
        Some("SAVE10"),
    );
    let err = place_order(&pool, &retry).await.unwrap_err();
    assert!(matches!(err, CheckoutError::VoucherAlreadyUsed));
    assert_eq!(stock_of(&pool, &product).await, 8);
}

#[sqlx::test(migrations = "../server/migrations")]
async fn unarchive_restores_stock_exactly_once(pool: PgPool) {
    let product = seed_product(&pool, "ube-jam", 120, 10, true).await;

    let input = checkout_input(
        vec![CartLine {
            id: product.id,
            quantity: 4,
        }],
        None,
    );
    let receipt = place_order(&pool, &input).await.unwrap();
    assert_eq!(stock_of(&pool, &product).await, 6);

    let orders = OrderRepository::new(&pool);
    orders.mark_completed(receipt.order_id).await.unwrap();

    orders.unarchive(receipt.order_id).await.unwrap();
    assert_eq!(stock_of(&pool, &product).await, 10);

    let detail = orders
        .get_with_details(receipt.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.order.status, OrderStatus::Canceled);
    assert_eq!(detail.order.payment_status, PaymentStatus::Failed);
    assert!(!detail.order.archived);

    // Repeating the unarchive must not restock a second time.
    let err = orders.unarchive(receipt.order_id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
    assert_eq!(stock_of(&pool, &product).await, 10);
}
