//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tindahan_core::{BrandId, CategoryId, ProductId, percent_of, round_money};

/// A catalog product with live stock.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL slug (unique).
    pub slug: String,
    /// Stock-keeping unit (unique when present).
    pub sku: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// List price.
    pub price: Decimal,
    /// Units on hand. Never negative.
    pub quantity: i32,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Optional brand.
    pub brand_id: Option<BrandId>,
    /// Whether the product can be sold.
    pub is_active: bool,
    /// Whether the product is featured on the storefront.
    pub is_featured: bool,
    /// Storefront in-stock flag (display only; `quantity` is authoritative).
    pub in_stock: bool,
    /// Whether the sale discount applies.
    pub on_sale: bool,
    /// Sale discount percentage (0-100) when `on_sale`.
    pub discount_percentage: Option<Decimal>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The unit price a buyer pays right now.
    ///
    /// Sale products are discounted by `discount_percentage`; the result is
    /// rounded to the money scale since it becomes an order item's
    /// `unit_amount` snapshot.
    #[must_use]
    pub fn effective_unit_price(&self) -> Decimal {
        if self.on_sale {
            let pct = self.discount_percentage.unwrap_or(Decimal::ZERO);
            round_money(self.price - percent_of(self.price, pct))
        } else {
            self.price
        }
    }
}

/// Sort orders for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductSort {
    /// Name A-Z.
    Az,
    /// Price ascending.
    PriceLowHigh,
    /// Price descending.
    PriceHighLow,
    /// Featured first, then newest.
    Featured,
    /// Newest first.
    #[default]
    Newest,
}

/// Filter criteria for product listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    /// Match against name, description, or SKU.
    pub search: Option<String>,
    /// Category name filter ("ALL" means no filter).
    pub category: Option<String>,
    /// Sort order.
    #[serde(default)]
    pub sort: ProductSort,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size (capped at 100).
    pub per_page: Option<u32>,
}

/// Input for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub slug: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: CategoryId,
    pub brand_id: Option<BrandId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub on_sale: bool,
    pub discount_percentage: Option<Decimal>,
}

const fn default_true() -> bool {
    true
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub in_stock: Option<bool>,
    pub on_sale: Option<bool>,
    pub discount_percentage: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(price: Decimal, on_sale: bool, pct: Option<Decimal>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Calamansi Soap".to_string(),
            slug: "calamansi-soap".to_string(),
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
    fn test_effective_price_plain() {
        let p = product(Decimal::from(100), false, None);
        assert_eq!(p.effective_unit_price(), Decimal::from(100));
    }

    #[test]
    fn test_effective_price_on_sale() {
        // 100 at 25% off -> 75.00
        let p = product(Decimal::from(100), true, Some(Decimal::from(25)));
        assert_eq!(p.effective_unit_price(), Decimal::new(7500, 2));
    }

    #[test]
    fn test_effective_price_sale_without_percentage() {
        // on_sale with no percentage behaves as 0% off
        let p = product(Decimal::from(100), true, None);
        assert_eq!(p.effective_unit_price(), Decimal::from(100));
    }

    #[test]
    fn test_effective_price_rounds_to_cents() {
        // 99.99 at 10% off = 89.991 -> 89.99
        let p = product(Decimal::new(9999, 2), true, Some(Decimal::from(10)));
        assert_eq!(p.effective_unit_price(), Decimal::new(8999, 2));
    }
}
