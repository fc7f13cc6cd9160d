//! Seed the database with sample catalog data for local development.
//!
//! Inserts a handful of categories, brands, products, and a couple of
//! vouchers. Idempotent: rows are keyed on slug/code and skipped when
//! they already exist.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::CliError;

struct SeedProduct {
    name: &'static str,
    slug: &'static str,
    sku: &'static str,
    price: Decimal,
    quantity: i32,
    category: &'static str,
    brand: Option<&'static str>,
    on_sale: bool,
    discount_percentage: Option<Decimal>,
}

/// Seed sample data.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    let categories = [
        ("Pantry", "pantry"),
        ("Beverages", "beverages"),
        ("Snacks", "snacks"),
    ];
    for (name, slug) in categories {
        sqlx::query(
            "INSERT INTO categories (name, slug) VALUES ($1, $2)
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(name)
        .bind(slug)
        .execute(&pool)
        .await?;
    }

    let brands = [("Lucky Sari", "lucky-sari"), ("Mang Tomas", "mang-tomas")];
    for (name, slug) in brands {
        sqlx::query(
            "INSERT INTO brands (name, slug) VALUES ($1, $2)
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(name)
        .bind(slug)
        .execute(&pool)
        .await?;
    }

    let products = [
        SeedProduct {
            name: "Bigas 5kg",
            slug: "bigas-5kg",
            sku: "PAN-0001",
            price: Decimal::new(32500, 2),
            quantity: 40,
            category: "pantry",
            brand: Some("lucky-sari"),
            on_sale: false,
            discount_percentage: None,
        },
        SeedProduct {
            name: "Sardinas in Tomato Sauce",
            slug: "sardinas-tomato",
            sku: "PAN-0002",
            price: Decimal::new(2850, 2),
            quantity: 120,
            category: "pantry",
            brand: Some("mang-tomas"),
            on_sale: true,
            discount_percentage: Some(Decimal::from(10)),
        },
        SeedProduct {
            name: "Calamansi Juice 1L",
            slug: "calamansi-juice-1l",
            sku: "BEV-0001",
            price: Decimal::new(9500, 2),
            quantity: 60,
            category: "beverages",
            brand: None,
            on_sale: false,
            discount_percentage: None,
        },
    ];
    for p in products {
        seed_product(&pool, &p).await?;
    }

    let vouchers = [
        ("SAVE10", "percent", Decimal::from(10)),
        ("PISO50", "fixed", Decimal::from(50)),
    ];
    for (code, voucher_type, amount) in vouchers {
        sqlx::query(
            "INSERT INTO vouchers (code, voucher_type, discount_amount, active)
             VALUES ($1, $2, $3, true)
             ON CONFLICT (code) DO NOTHING",
        )
        .bind(code)
        .bind(voucher_type)
        .bind(amount)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seed complete");
    Ok(())
}

async fn seed_product(pool: &PgPool, p: &SeedProduct) -> Result<(), CliError> {
    sqlx::query(
        "INSERT INTO products
             (name, slug, sku, price, quantity, category_id, brand_id,
              is_active, in_stock, on_sale, discount_percentage)
         SELECT $1, $2, $3, $4, $5,
                c.id, b.id,
                true, $5 > 0, $8, $9
         FROM categories c
         LEFT JOIN brands b ON b.slug = $7
         WHERE c.slug = $6
         ON CONFLICT (slug) DO NOTHING",
    )
    .bind(p.name)
    .bind(p.slug)
    .bind(p.sku)
    .bind(p.price)
    .bind(p.quantity)
    .bind(p.category)
    .bind(p.brand)
    .bind(p.on_sale)
    .bind(p.discount_percentage)
    .execute(pool)
    .await?;
    Ok(())
}
